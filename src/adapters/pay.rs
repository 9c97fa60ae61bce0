use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::ErrorCode,
            payment::{PaymentRequest, PaymentTarget},
        },
    },
    axum::{
        Json,
        body::Bytes,
        extract::{State, rejection::BytesRejection},
        http::StatusCode,
        response::IntoResponse,
    },
};

/// `POST /api/pay`: validate the body, resolve the order, open a payment
/// with the requested provider.
#[tracing::instrument(
    name = "pay",
    skip_all,
    fields(
        request_id = %uuid::Uuid::now_v7(),
        provider = tracing::field::Empty,
        order_id = tracing::field::Empty,
    )
)]
pub async fn pay_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Over-limit and unreadable bodies get the same JSON shape as bad JSON.
    let body = body.map_err(|rejection| {
        tracing::info!(%rejection, "request body could not be read");
        ErrorCode::InvalidRequestBody
    })?;
    let request = std::str::from_utf8(&body)
        .map_err(|_| ErrorCode::InvalidRequestBody)
        .and_then(PaymentRequest::from_body)
        .inspect_err(|code| tracing::info!(%code, "payment request rejected"))?;

    let span = tracing::Span::current();
    span.record("provider", tracing::field::display(request.provider));
    if let PaymentTarget::Existing { order_id } = &request.target {
        span.record("order_id", tracing::field::display(order_id));
    }

    let initiated = state.dispatcher.dispatch(request).await?;

    Ok(Json(serde_json::json!({
        "ok": true,
        "provider": initiated.provider,
        "orderId": initiated.order_id,
        "data": {
            "paymentUrl": initiated.payment_url,
        },
    })))
}

/// Any method other than POST on the payment route.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({"message": "Only POST requests allowed"})),
    )
}
