use {
    crate::{
        domain::{
            error::{DeclineReason, DispatchError, ErrorCode, ResolveError},
            payment::{PaymentInitiated, PaymentRequest},
            provider::OrderResolver,
            registry::ProviderRegistry,
        },
        services::order_resolver::resolve_order,
    },
    std::{sync::Arc, time::Duration},
};

/// Upper bounds for the two external calls of a request.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub order: Duration,
    pub provider: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            order: Duration::from_secs(10),
            provider: Duration::from_secs(10),
        }
    }
}

/// Resolves the order for a validated request and hands it to the
/// provider's adapter.
pub struct Dispatcher {
    resolver: Arc<dyn OrderResolver>,
    registry: ProviderRegistry,
    timeouts: Timeouts,
}

impl Dispatcher {
    pub fn new(
        resolver: Arc<dyn OrderResolver>,
        registry: ProviderRegistry,
        timeouts: Timeouts,
    ) -> Self {
        Self {
            resolver,
            registry,
            timeouts,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Runs one request to completion. Order resolution always finishes
    /// before the provider is called; neither call is retried.
    pub async fn dispatch(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentInitiated, DispatchError> {
        let order =
            match resolve_order(&*self.resolver, &request.target, self.timeouts.order).await {
                Ok(order) => order,
                Err(ResolveError::Upstream(codes)) if !codes.is_empty() => {
                    tracing::warn!(?codes, "order system rejected the request");
                    return Err(DispatchError::Rejected(codes));
                }
                Err(e) => {
                    tracing::error!(error = %e, "order resolution failed");
                    return Err(DispatchError::rejected(ErrorCode::UpstreamUnavailable));
                }
            };

        tracing::Span::current().record("order_id", tracing::field::display(order.id()));

        let adapter = self.registry.adapter(request.provider);
        let outcome = tokio::time::timeout(
            self.timeouts.provider,
            adapter.initiate_payment(&order, request.redirect_url.as_ref()),
        )
        .await
        .unwrap_or(Err(DeclineReason::Timeout(self.timeouts.provider)));

        match outcome {
            Ok(payment_url) => {
                tracing::info!(%payment_url, "payment initiated");
                Ok(PaymentInitiated {
                    provider: request.provider,
                    order_id: order.id().clone(),
                    payment_url,
                })
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "provider did not issue a payment url");
                Err(DispatchError::Declined {
                    provider: request.provider,
                    order_id: order.id().clone(),
                    reason,
                })
            }
        }
    }
}
