#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use checkout_pay::{
    AppState, build_router,
    domain::{
        error::{DeclineReason, ErrorCode, ResolveError},
        id::{CheckoutId, OrderId},
        money::{Currency, Money},
        order::Order,
        payment::TotalAmount,
        provider::{BoxFuture, OrderResolver, PaymentProvider},
        registry::{ProviderId, ProviderRegistry},
    },
    services::dispatcher::{Dispatcher, Timeouts},
};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;
use url::Url;

// ── Mock order system ──────────────────────────────────────────────────────

pub enum ResolverBehavior {
    Succeed,
    Reject(Vec<ErrorCode>),
    Unreachable,
    Hang,
}

/// Counts calls. `create_order` mints a fresh order id per call
/// (`ord_1`, `ord_2`, …); `fetch_order` echoes the requested id.
pub struct MockResolver {
    behavior: ResolverBehavior,
    pub create_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl MockResolver {
    pub fn new(behavior: ResolverBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            create_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst) + self.fetch_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, id: String) -> Result<Order, ResolveError> {
        match &self.behavior {
            ResolverBehavior::Succeed => Ok(sample_order(&id)),
            ResolverBehavior::Reject(codes) => Err(ResolveError::Upstream(codes.clone())),
            ResolverBehavior::Unreachable => {
                Err(ResolveError::Transport("connection refused".into()))
            }
            ResolverBehavior::Hang => std::future::pending().await,
        }
    }
}

impl OrderResolver for MockResolver {
    fn create_order<'a>(
        &'a self,
        _checkout_id: &'a CheckoutId,
        _total_amount: TotalAmount,
    ) -> BoxFuture<'a, Result<Order, ResolveError>> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Box::pin(self.respond(format!("ord_{n}")))
    }

    fn fetch_order<'a>(
        &'a self,
        order_id: &'a OrderId,
    ) -> BoxFuture<'a, Result<Order, ResolveError>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(self.respond(order_id.as_str().to_string()))
    }
}

pub fn sample_order(id: &str) -> Order {
    Order::new(
        OrderId::new(id).unwrap(),
        Money::from_major(42.0, Currency::new("EUR").unwrap()).unwrap(),
    )
}

// ── Mock providers ─────────────────────────────────────────────────────────

pub enum ProviderBehavior {
    Url(&'static str),
    Decline,
    Hang,
}

pub struct MockProvider {
    id: ProviderId,
    behavior: ProviderBehavior,
    pub calls: AtomicUsize,
    pub last_redirect: Mutex<Option<Option<Url>>>,
}

impl MockProvider {
    pub fn new(id: ProviderId, behavior: ProviderBehavior) -> Arc<Self> {
        Arc::new(Self {
            id,
            behavior,
            calls: AtomicUsize::new(0),
            last_redirect: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PaymentProvider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn initiate_payment<'a>(
        &'a self,
        _order: &'a Order,
        redirect_url: Option<&'a Url>,
    ) -> BoxFuture<'a, Result<Url, DeclineReason>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_redirect.lock().unwrap() = Some(redirect_url.cloned());
        Box::pin(async move {
            match self.behavior {
                ProviderBehavior::Url(url) => Ok(Url::parse(url).unwrap()),
                ProviderBehavior::Decline => Err(DeclineReason::MissingCheckoutUrl),
                ProviderBehavior::Hang => std::future::pending().await,
            }
        })
    }
}

// ── Wiring ─────────────────────────────────────────────────────────────────

pub struct Harness {
    pub resolver: Arc<MockResolver>,
    pub mollie: Arc<MockProvider>,
    pub adyen: Arc<MockProvider>,
    pub router: Router,
}

pub fn harness(
    resolver: ResolverBehavior,
    mollie: ProviderBehavior,
    adyen: ProviderBehavior,
) -> Harness {
    harness_with_timeouts(resolver, mollie, adyen, Timeouts::default())
}

pub fn harness_with_timeouts(
    resolver: ResolverBehavior,
    mollie: ProviderBehavior,
    adyen: ProviderBehavior,
    timeouts: Timeouts,
) -> Harness {
    let resolver = MockResolver::new(resolver);
    let mollie = MockProvider::new(ProviderId::Mollie, mollie);
    let adyen = MockProvider::new(ProviderId::Adyen, adyen);
    let router = router_with(resolver.clone(), &mollie, &adyen, timeouts);

    Harness {
        resolver,
        mollie,
        adyen,
        router,
    }
}

/// Full router over any order resolver, e.g. a real client pointed at a
/// fake server.
pub fn router_with(
    resolver: Arc<dyn OrderResolver>,
    mollie: &Arc<MockProvider>,
    adyen: &Arc<MockProvider>,
    timeouts: Timeouts,
) -> Router {
    let registry = ProviderRegistry::new(vec![
        mollie.clone() as Arc<dyn PaymentProvider>,
        adyen.clone() as Arc<dyn PaymentProvider>,
    ])
    .unwrap();
    build_router(AppState::new(Dispatcher::new(resolver, registry, timeouts)))
}

pub fn short_timeouts() -> Timeouts {
    Timeouts {
        order: Duration::from_millis(50),
        provider: Duration::from_millis(50),
    }
}

/// Sends one request through the router and returns status + JSON body.
pub async fn send(router: &Router, method: Method, body: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/api/pay")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn post(router: &Router, body: &str) -> (StatusCode, serde_json::Value) {
    send(router, Method::POST, body).await
}

/// Serves `router` on an ephemeral local port and returns its base url.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
