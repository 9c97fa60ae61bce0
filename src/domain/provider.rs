use {
    super::{
        error::{DeclineReason, ResolveError},
        id::{CheckoutId, OrderId},
        order::Order,
        payment::TotalAmount,
        registry::ProviderId,
    },
    std::{future::Future, pin::Pin},
    url::Url,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A payment provider that can open a hosted payment page for an order.
pub trait PaymentProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Returns the URL the shopper should be sent to, or the reason the
    /// provider would not issue one. Must not panic.
    fn initiate_payment<'a>(
        &'a self,
        order: &'a Order,
        redirect_url: Option<&'a Url>,
    ) -> BoxFuture<'a, Result<Url, DeclineReason>>;
}

/// The upstream order system.
pub trait OrderResolver: Send + Sync {
    /// Converts a checkout into an order. Not idempotent: calling twice
    /// with the same checkout relies on the order system to deduplicate.
    fn create_order<'a>(
        &'a self,
        checkout_id: &'a CheckoutId,
        total_amount: TotalAmount,
    ) -> BoxFuture<'a, Result<Order, ResolveError>>;

    fn fetch_order<'a>(&'a self, order_id: &'a OrderId)
    -> BoxFuture<'a, Result<Order, ResolveError>>;
}
