use {
    super::{
        error::ErrorCode,
        id::{CheckoutId, OrderId},
        registry::ProviderId,
    },
    serde_json::{Map, Value},
    url::Url,
};

/// Order total as sent by the storefront, in major units. Always finite
/// and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalAmount(f64);

impl TotalAmount {
    pub fn new(amount: f64) -> Result<Self, ErrorCode> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ErrorCode::InvalidTotalAmount);
        }
        Ok(Self(amount))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Where the order comes from. Exactly one of the two, by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentTarget {
    Checkout {
        checkout_id: CheckoutId,
        total_amount: TotalAmount,
    },
    Existing {
        order_id: OrderId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub provider: ProviderId,
    pub redirect_url: Option<Url>,
    pub target: PaymentTarget,
}

impl PaymentRequest {
    /// Normalizes and validates a raw request body.
    ///
    /// The body is either a JSON object or a JSON string whose contents are
    /// that object. Checks run in a fixed order: body shape, provider, order
    /// target, total amount, redirect url. The first failing check wins.
    pub fn from_body(raw: &str) -> Result<Self, ErrorCode> {
        let fields = parse_object(raw)?;
        Self::from_fields(&fields)
    }

    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ErrorCode> {
        let provider = field(fields, "provider")
            .and_then(Value::as_str)
            .and_then(ProviderId::parse)
            .ok_or(ErrorCode::UnknownProvider)?;

        let target = if let Some(checkout_id) = field(fields, "checkoutId") {
            let checkout_id = checkout_id
                .as_str()
                .ok_or(ErrorCode::InvalidRequestBody)
                .and_then(CheckoutId::new)?;
            let total_amount = field(fields, "totalAmount")
                .and_then(Value::as_f64)
                .ok_or(ErrorCode::InvalidTotalAmount)
                .and_then(TotalAmount::new)?;
            PaymentTarget::Checkout {
                checkout_id,
                total_amount,
            }
        } else if let Some(order_id) = field(fields, "orderId") {
            let order_id = order_id
                .as_str()
                .ok_or(ErrorCode::InvalidRequestBody)
                .and_then(OrderId::new)?;
            PaymentTarget::Existing { order_id }
        } else {
            return Err(ErrorCode::MissingCheckoutOrOrderId);
        };

        let redirect_url = match field(fields, "redirectUrl") {
            None => None,
            Some(value) => {
                let raw = value.as_str().ok_or(ErrorCode::InvalidRedirectUrl)?;
                Some(Url::parse(raw).map_err(|_| ErrorCode::InvalidRedirectUrl)?)
            }
        };

        Ok(Self {
            provider,
            redirect_url,
            target,
        })
    }
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, ErrorCode> {
    let value: Value = serde_json::from_str(raw).map_err(|_| ErrorCode::InvalidRequestBody)?;
    let value = match value {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|_| ErrorCode::InvalidRequestBody)?
        }
        other => other,
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ErrorCode::InvalidRequestBody),
    }
}

// `null` counts as absent.
fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// A provider accepted the order and issued a hosted payment page.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInitiated {
    pub provider: ProviderId,
    pub order_id: OrderId,
    pub payment_url: Url,
}
