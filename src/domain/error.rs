use {
    super::{id::OrderId, registry::ProviderId},
    serde::{Serialize, Serializer},
    std::{fmt, time::Duration},
    thiserror::Error,
};

/// Error codes that reach the caller in `{ok: false, errors: [...]}`.
///
/// The named variants are produced locally. `Upstream` carries a code
/// reported by the order system, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    UnknownProvider,
    MissingCheckoutOrOrderId,
    InvalidRequestBody,
    InvalidTotalAmount,
    InvalidRedirectUrl,
    OrderNotFound,
    CheckoutNotFound,
    TotalAmountMismatch,
    UpstreamUnavailable,
    Upstream(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::UnknownProvider => "UNKNOWN_PROVIDER",
            Self::MissingCheckoutOrOrderId => "MISSING_CHECKOUT_OR_ORDER_ID",
            Self::InvalidRequestBody => "INVALID_REQUEST_BODY",
            Self::InvalidTotalAmount => "INVALID_TOTAL_AMOUNT",
            Self::InvalidRedirectUrl => "INVALID_REDIRECT_URL",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::CheckoutNotFound => "CHECKOUT_NOT_FOUND",
            Self::TotalAmountMismatch => "TOTAL_AMOUNT_MISMATCH",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Upstream(code) => code,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome errors of a single payment request.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request rejected: {}", join_codes(.0))]
    Rejected(Vec<ErrorCode>),

    #[error("{provider} declined order {order_id}: {reason}")]
    Declined {
        provider: ProviderId,
        order_id: OrderId,
        reason: DeclineReason,
    },
}

impl DispatchError {
    pub fn rejected(code: ErrorCode) -> Self {
        Self::Rejected(vec![code])
    }
}

fn join_codes(codes: &[ErrorCode]) -> String {
    codes
        .iter()
        .map(ErrorCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure reported by the order system.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("order system reported: {}", join_codes(.0))]
    Upstream(Vec<ErrorCode>),

    #[error("order system unreachable: {0}")]
    Transport(String),

    #[error("unexpected response from order system: {0}")]
    Unexpected(String),

    #[error("order system timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Why a provider adapter did not produce a payment URL.
#[derive(Debug, Error)]
pub enum DeclineReason {
    #[error("no redirect url supplied")]
    MissingRedirectUrl,

    #[error("provider answered {status}: {detail}")]
    Rejected { status: u16, detail: String },

    #[error("provider response has no checkout url")]
    MissingCheckoutUrl,

    #[error("provider returned an invalid checkout url: {0}")]
    InvalidCheckoutUrl(String),

    #[error("transport: {0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for DeclineReason {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Start-up configuration problems. These are the only fatal errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("provider {0} has no adapter")]
    MissingAdapter(ProviderId),

    #[error("provider {0} has more than one adapter")]
    DuplicateAdapter(ProviderId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_as_plain_strings() {
        let codes = vec![
            ErrorCode::UnknownProvider,
            ErrorCode::Upstream("CHECKOUT_NOT_FULLY_PAID".into()),
        ];
        assert_eq!(
            serde_json::to_value(&codes).unwrap(),
            serde_json::json!(["UNKNOWN_PROVIDER", "CHECKOUT_NOT_FULLY_PAID"])
        );
    }

    #[test]
    fn rejected_display_lists_codes() {
        let err = DispatchError::Rejected(vec![
            ErrorCode::OrderNotFound,
            ErrorCode::UpstreamUnavailable,
        ]);
        assert_eq!(
            err.to_string(),
            "request rejected: ORDER_NOT_FOUND, UPSTREAM_UNAVAILABLE"
        );
    }
}
