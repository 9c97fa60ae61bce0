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

pub const DEFAULT_API_URL: &str = "https://api.mollie.com/v2";

/// Mollie Payments API client. Creates a payment and hands back the
/// hosted checkout link.
pub struct MollieProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CreatedPayment {
    #[serde(rename = "_links")]
    links: PaymentLinks,
}

#[derive(Debug, Deserialize)]
struct PaymentLinks {
    checkout: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

impl MollieProvider {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn create_payment(
        &self,
        order: &Order,
        redirect_url: Option<&Url>,
    ) -> Result<Url, DeclineReason> {
        // Mollie refuses payments without a redirect target.
        let redirect_url = redirect_url.ok_or(DeclineReason::MissingRedirectUrl)?;
        let url = format!("{}/payments", self.base_url);
        tracing::debug!(%url, order_id = %order.id(), "creating mollie payment");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payment_body(order, redirect_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let detail = resp.text().await.unwrap_or_default();
            return Err(DeclineReason::Rejected { status, detail });
        }

        let created: CreatedPayment = resp.json().await?;
        let href = created
            .links
            .checkout
            .ok_or(DeclineReason::MissingCheckoutUrl)?
            .href;
        Url::parse(&href).map_err(|_| DeclineReason::InvalidCheckoutUrl(href))
    }
}

impl PaymentProvider for MollieProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mollie
    }

    fn initiate_payment<'a>(
        &'a self,
        order: &'a Order,
        redirect_url: Option<&'a Url>,
    ) -> BoxFuture<'a, Result<Url, DeclineReason>> {
        Box::pin(self.create_payment(order, redirect_url))
    }
}

fn payment_body(order: &Order, redirect_url: &Url) -> serde_json::Value {
    let total = order.total();
    serde_json::json!({
        "amount": {
            "currency": total.currency().as_str(),
            "value": total.decimal_string(),
        },
        "description": order.description(),
        "redirectUrl": redirect_url.as_str(),
        "metadata": {
            "orderId": order.id(),
        },
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::domain::{
            id::OrderId,
            money::{Currency, Money},
        },
    };

    #[test]
    fn body_uses_decimal_string_amount() {
        let order = Order::new(
            OrderId::new("ord_1").unwrap(),
            Money::from_major(42.0, Currency::new("EUR").unwrap()).unwrap(),
        )
        .with_number("1042");
        let redirect = Url::parse("https://shop/x").unwrap();

        assert_eq!(
            payment_body(&order, &redirect),
            serde_json::json!({
                "amount": {"currency": "EUR", "value": "42.00"},
                "description": "Order #1042",
                "redirectUrl": "https://shop/x",
                "metadata": {"orderId": "ord_1"},
            })
        );
    }

    #[tokio::test]
    async fn missing_redirect_declines_without_calling_mollie() {
        // Unroutable base url: any request would fail with a transport error.
        let provider = MollieProvider::new(reqwest::Client::new(), "http://127.0.0.1:1", "test_key");
        let order = Order::new(
            OrderId::new("ord_3").unwrap(),
            Money::from_major(1.0, Currency::new("EUR").unwrap()).unwrap(),
        );

        let err = provider.initiate_payment(&order, None).await.unwrap_err();
        assert!(matches!(err, DeclineReason::MissingRedirectUrl));
    }
}
