use {
    crate::domain::{
        error::{ErrorCode, ResolveError},
        id::{CheckoutId, OrderId},
        money::{Currency, Money, MoneyAmount},
        order::{Order, OrderLine},
        payment::TotalAmount,
        provider::{BoxFuture, OrderResolver},
    },
    serde::{Deserialize, de::DeserializeOwned},
};

const ORDER_FIELDS: &str = "
fragment OrderFields on Order {
  id
  number
  userEmail
  total { gross { amount currency } }
  lines { productName quantity unitPrice { gross { amount currency } } }
}";

const CHECKOUT_TOTAL: &str = "
query CheckoutTotal($id: ID!) {
  checkout(id: $id) { totalPrice { gross { amount currency } } }
}";

const ORDER_CREATE: &str = "
mutation OrderCreateFromCheckout($id: ID!) {
  orderCreateFromCheckout(id: $id, removeCheckout: true) {
    order { ...OrderFields }
    errors { code }
  }
}";

const ORDER_DETAILS: &str = "
query OrderDetails($id: ID!) {
  order(id: $id) { ...OrderFields }
}";

/// Saleor GraphQL client acting as the order system.
pub struct SaleorClient {
    client: reqwest::Client,
    api_url: String,
    app_token: String,
}

// ── GraphQL wire types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    extensions: Option<GraphQlExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQlExtensions {
    exception: Option<GraphQlException>,
}

#[derive(Debug, Deserialize)]
struct GraphQlException {
    code: Option<String>,
}

impl GraphQlError {
    fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.exception.as_ref()?.code.as_deref()
    }
}

/// Top-level errors carrying an exception code are a definite answer from
/// Saleor and reach the caller as-is. Code-less errors stay unexpected.
fn graphql_failure(errors: Vec<GraphQlError>) -> ResolveError {
    let codes: Vec<_> = errors
        .iter()
        .filter_map(|e| e.code().map(|code| ErrorCode::Upstream(code.to_string())))
        .collect();
    if !codes.is_empty() {
        tracing::warn!(?codes, "saleor rejected the operation");
        return ResolveError::Upstream(codes);
    }
    let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
    ResolveError::Unexpected(messages.join("; "))
}

#[derive(Debug, Deserialize)]
struct CheckoutData {
    checkout: Option<CheckoutNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutNode {
    total_price: TaxedMoney,
}

#[derive(Debug, Deserialize)]
struct OrderCreateData {
    #[serde(rename = "orderCreateFromCheckout")]
    result: Option<OrderCreatePayload>,
}

#[derive(Debug, Deserialize)]
struct OrderCreatePayload {
    order: Option<OrderNode>,
    #[serde(default)]
    errors: Vec<MutationError>,
}

#[derive(Debug, Deserialize)]
struct MutationError {
    code: String,
}

#[derive(Debug, Deserialize)]
struct OrderData {
    order: Option<OrderNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderNode {
    id: String,
    number: Option<String>,
    user_email: Option<String>,
    total: TaxedMoney,
    #[serde(default)]
    lines: Vec<LineNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineNode {
    product_name: String,
    quantity: u32,
    unit_price: TaxedMoney,
}

#[derive(Debug, Deserialize)]
struct TaxedMoney {
    gross: MoneyNode,
}

#[derive(Debug, Deserialize)]
struct MoneyNode {
    amount: f64,
    currency: String,
}

impl TryFrom<MoneyNode> for Money {
    type Error = ResolveError;

    fn try_from(node: MoneyNode) -> Result<Self, Self::Error> {
        let currency =
            Currency::new(&node.currency).map_err(|e| ResolveError::Unexpected(e.to_string()))?;
        Money::from_major(node.amount, currency)
            .map_err(|e| ResolveError::Unexpected(e.to_string()))
    }
}

impl TryFrom<OrderNode> for Order {
    type Error = ResolveError;

    fn try_from(node: OrderNode) -> Result<Self, Self::Error> {
        let id = OrderId::new(node.id)
            .map_err(|_| ResolveError::Unexpected("order without id".into()))?;
        let lines = node
            .lines
            .into_iter()
            .map(|line| {
                Ok::<_, ResolveError>(OrderLine {
                    product_name: line.product_name,
                    quantity: line.quantity,
                    unit_price: line.unit_price.gross.try_into()?,
                })
            })
            .collect::<Result<Vec<_>, ResolveError>>()?;

        let mut order = Order::new(id, node.total.gross.try_into()?).with_lines(lines);
        if let Some(number) = node.number {
            order = order.with_number(number);
        }
        if let Some(email) = node.user_email {
            order = order.with_user_email(email);
        }
        Ok(order)
    }
}

// ── Client ───────────────────────────────────────────────────────────────────

impl SaleorClient {
    pub fn new(client: reqwest::Client, api_url: &str, app_token: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            app_token: app_token.into(),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: String,
        variables: serde_json::Value,
    ) -> Result<T, ResolveError> {
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.app_token)
            .json(&serde_json::json!({"query": query, "variables": variables}))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ResolveError::Transport(format!("saleor returned {status}: {body}")));
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        if !body.errors.is_empty() {
            return Err(graphql_failure(body.errors));
        }
        body.data
            .ok_or_else(|| ResolveError::Unexpected("response without data".into()))
    }

    async fn create_order_inner(
        &self,
        checkout_id: &CheckoutId,
        total_amount: TotalAmount,
    ) -> Result<Order, ResolveError> {
        let data: CheckoutData = self
            .execute(
                CHECKOUT_TOTAL.to_string(),
                serde_json::json!({"id": checkout_id}),
            )
            .await?;
        let gross = data
            .checkout
            .ok_or_else(|| ResolveError::Upstream(vec![ErrorCode::CheckoutNotFound]))?
            .total_price
            .gross;

        // Compare in the checkout's own minor units so float noise cannot
        // cause a spurious mismatch.
        let currency =
            Currency::new(&gross.currency).map_err(|e| ResolveError::Unexpected(e.to_string()))?;
        let expected = MoneyAmount::from_major(gross.amount, &currency)
            .map_err(|e| ResolveError::Unexpected(e.to_string()))?;
        let requested = MoneyAmount::from_major(total_amount.value(), &currency)
            .map_err(|_| ResolveError::Upstream(vec![ErrorCode::InvalidTotalAmount]))?;
        if expected != requested {
            tracing::warn!(
                checkout_id = %checkout_id,
                %expected,
                %requested,
                "checkout total does not match requested amount"
            );
            return Err(ResolveError::Upstream(vec![ErrorCode::TotalAmountMismatch]));
        }

        let data: OrderCreateData = self
            .execute(
                format!("{ORDER_CREATE}\n{ORDER_FIELDS}"),
                serde_json::json!({"id": checkout_id}),
            )
            .await?;
        let payload = data.result.ok_or_else(|| {
            ResolveError::Unexpected("orderCreateFromCheckout returned null".into())
        })?;

        if !payload.errors.is_empty() {
            let codes = payload
                .errors
                .into_iter()
                .map(|e| ErrorCode::Upstream(e.code))
                .collect();
            return Err(ResolveError::Upstream(codes));
        }

        let order: Order = payload
            .order
            .ok_or_else(|| ResolveError::Unexpected("order missing from mutation result".into()))?
            .try_into()?;
        tracing::info!(checkout_id = %checkout_id, order_id = %order.id(), "order created");
        Ok(order)
    }

    async fn fetch_order_inner(&self, order_id: &OrderId) -> Result<Order, ResolveError> {
        let data: OrderData = self
            .execute(
                format!("{ORDER_DETAILS}\n{ORDER_FIELDS}"),
                serde_json::json!({"id": order_id}),
            )
            .await?;
        data.order
            .ok_or_else(|| ResolveError::Upstream(vec![ErrorCode::OrderNotFound]))?
            .try_into()
    }
}

impl OrderResolver for SaleorClient {
    fn create_order<'a>(
        &'a self,
        checkout_id: &'a CheckoutId,
        total_amount: TotalAmount,
    ) -> BoxFuture<'a, Result<Order, ResolveError>> {
        Box::pin(self.create_order_inner(checkout_id, total_amount))
    }

    fn fetch_order<'a>(
        &'a self,
        order_id: &'a OrderId,
    ) -> BoxFuture<'a, Result<Order, ResolveError>> {
        Box::pin(self.fetch_order_inner(order_id))
    }
}
