use derive_more::Display;
use serde::Serialize;

use super::error::ErrorCode;

/// Checkout identifier in the order system. Opaque, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct CheckoutId(String);

impl CheckoutId {
    pub fn new(id: impl Into<String>) -> Result<Self, ErrorCode> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorCode::MissingCheckoutOrOrderId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Order identifier in the order system. Opaque, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Result<Self, ErrorCode> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ErrorCode::MissingCheckoutOrOrderId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
