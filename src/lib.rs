pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

use {
    adapters::{adyen::AdyenProvider, mollie::MollieProvider, pay, saleor::SaleorClient},
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::Method,
        routing::{get, post},
    },
    config::Config,
    domain::{error::ConfigError, registry::ProviderRegistry},
    services::dispatcher::Dispatcher,
    std::sync::Arc,
    tower_http::cors::{Any, CorsLayer},
};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Wires the Saleor resolver and both provider adapters. Fails if the
    /// registry would be left with a provider that has no adapter.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("checkout_pay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "http client",
                reason: e.to_string(),
            })?;

        let resolver = SaleorClient::new(
            http.clone(),
            &config.saleor_api_url,
            config.saleor_app_token.clone(),
        );
        let registry = ProviderRegistry::new(vec![
            Arc::new(MollieProvider::new(
                http.clone(),
                &config.mollie_api_url,
                config.mollie_api_key.clone(),
            )),
            Arc::new(AdyenProvider::new(
                http,
                &config.adyen_checkout_url,
                config.adyen_api_key.clone(),
                config.adyen_merchant_account.clone(),
            )),
        ])?;

        Ok(Self::new(Dispatcher::new(
            Arc::new(resolver),
            registry,
            config.timeouts,
        )))
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/api/pay",
            post(pay::pay_handler).fallback(pay::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .with_state(state)
}
