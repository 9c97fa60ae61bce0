use {
    crate::domain::{
        error::ResolveError, order::Order, payment::PaymentTarget, provider::OrderResolver,
    },
    std::time::Duration,
};

/// Create or fetch the order a payment request points at, bounded by
/// `timeout`.
pub async fn resolve_order(
    resolver: &dyn OrderResolver,
    target: &PaymentTarget,
    timeout: Duration,
) -> Result<Order, ResolveError> {
    let call = async {
        match target {
            PaymentTarget::Checkout {
                checkout_id,
                total_amount,
            } => {
                tracing::debug!(checkout_id = %checkout_id, amount = total_amount.value(), "creating order from checkout");
                resolver.create_order(checkout_id, *total_amount).await
            }
            PaymentTarget::Existing { order_id } => {
                tracing::debug!(order_id = %order_id, "fetching existing order");
                resolver.fetch_order(order_id).await
            }
        }
    };

    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| ResolveError::Timeout(timeout))?
}
