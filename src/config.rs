use {
    crate::{
        adapters::{adyen, mollie},
        domain::error::ConfigError,
        services::dispatcher::Timeouts,
    },
    std::{env, net::SocketAddr, time::Duration},
};

/// Process configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub saleor_api_url: String,
    pub saleor_app_token: String,
    pub mollie_api_url: String,
    pub mollie_api_key: String,
    pub adyen_checkout_url: String,
    pub adyen_api_key: String,
    pub adyen_merchant_account: String,
    pub timeouts: Timeouts,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let millis = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match get(key) {
                None => Ok(Duration::from_millis(default)),
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(0) | Err(_) => Err(ConfigError::Invalid {
                        key,
                        reason: format!("expected a positive number of milliseconds, got {raw:?}"),
                    }),
                    Ok(ms) => Ok(Duration::from_millis(ms)),
                },
            }
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let saleor_api_url = required("SALEOR_API_URL")?;
        url::Url::parse(&saleor_api_url).map_err(|e| ConfigError::Invalid {
            key: "SALEOR_API_URL",
            reason: e.to_string(),
        })?;

        Ok(Self {
            bind_addr,
            saleor_api_url,
            saleor_app_token: required("SALEOR_APP_TOKEN")?,
            mollie_api_url: get("MOLLIE_API_URL").unwrap_or_else(|| mollie::DEFAULT_API_URL.into()),
            mollie_api_key: required("MOLLIE_API_KEY")?,
            adyen_checkout_url: get("ADYEN_CHECKOUT_URL")
                .unwrap_or_else(|| adyen::DEFAULT_CHECKOUT_URL.into()),
            adyen_api_key: required("ADYEN_API_KEY")?,
            adyen_merchant_account: required("ADYEN_MERCHANT_ACCOUNT")?,
            timeouts: Timeouts {
                order: millis("ORDER_TIMEOUT_MS", 10_000)?,
                provider: millis("PROVIDER_TIMEOUT_MS", 10_000)?,
            },
        })
    }
}
