use {
    crate::domain::{
        error::DeclineReason,
        order::Order,
        provider::{BoxFuture, PaymentProvider},
        registry::ProviderId,
    },
    serde::Deserialize,
    url::Url,
};

pub const DEFAULT_CHECKOUT_URL: &str = "https://checkout-test.adyen.com/v71";

/// Adyen Checkout client. Opens a pay-by-link session for the order.
pub struct AdyenProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    merchant_account: String,
}

#[derive(Debug, Deserialize)]
struct PaymentLink {
    url: Option<String>,
}

impl AdyenProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        merchant_account: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            merchant_account: merchant_account.into(),
        }
    }

    async fn create_payment_link(
        &self,
        order: &Order,
        redirect_url: Option<&Url>,
    ) -> Result<Url, DeclineReason> {
        let url = format!("{}/paymentLinks", self.base_url);
        tracing::debug!(%url, order_id = %order.id(), "creating adyen payment link");

        let resp = self
            .client
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .json(&payment_link_body(order, redirect_url, &self.merchant_account))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let detail = resp.text().await.unwrap_or_default();
            return Err(DeclineReason::Rejected { status, detail });
        }

        let link: PaymentLink = resp.json().await?;
        let href = link
            .url
            .filter(|u| !u.is_empty())
            .ok_or(DeclineReason::MissingCheckoutUrl)?;
        Url::parse(&href).map_err(|_| DeclineReason::InvalidCheckoutUrl(href))
    }
}

impl PaymentProvider for AdyenProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Adyen
    }

    fn initiate_payment<'a>(
        &'a self,
        order: &'a Order,
        redirect_url: Option<&'a Url>,
    ) -> BoxFuture<'a, Result<Url, DeclineReason>> {
        Box::pin(self.create_payment_link(order, redirect_url))
    }
}

// Adyen amounts are integers in minor units.
fn payment_link_body(
    order: &Order,
    redirect_url: Option<&Url>,
    merchant_account: &str,
) -> serde_json::Value {
    let total = order.total();
    let mut body = serde_json::json!({
        "reference": order.id(),
        "merchantAccount": merchant_account,
        "description": order.description(),
        "amount": {
            "currency": total.currency().as_str(),
            "value": total.amount().minor(),
        },
        "metadata": {
            "orderId": order.id(),
        },
        "lineItems": order.lines().iter().map(|line| serde_json::json!({
            "description": line.product_name,
            "quantity": line.quantity,
            "amountIncludingTax": line.unit_price.amount().minor(),
        })).collect::<Vec<_>>(),
    });

    if let Some(redirect_url) = redirect_url {
        body["returnUrl"] = redirect_url.as_str().into();
    }
    if let Some(email) = order.user_email() {
        body["shopperEmail"] = email.into();
    }
    body
}
