use crate::domain::error::{DispatchError, ErrorCode};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so it can be returned from axum handlers.
#[derive(Debug)]
pub struct ApiError(pub DispatchError);

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        Self(err)
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        Self(DispatchError::rejected(code))
    }
}

// Every failure is a 400. The body shape tells the caller whether it got
// a list of codes or a bare provider decline.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.0 {
            DispatchError::Rejected(errors) => serde_json::json!({
                "ok": false,
                "errors": errors,
            }),
            DispatchError::Declined { order_id, .. } => serde_json::json!({
                "ok": false,
                "orderId": order_id,
            }),
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
