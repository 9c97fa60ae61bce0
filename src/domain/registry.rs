use {
    super::{error::ConfigError, provider::PaymentProvider},
    serde::Serialize,
    std::{fmt, sync::Arc},
};

/// Supported payment providers, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Mollie,
    Adyen,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::Mollie, ProviderId::Adyen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mollie => "mollie",
            Self::Adyen => "adyen",
        }
    }

    /// Exact, case-sensitive match against the registry.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn is_supported(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    fn index(&self) -> usize {
        match self {
            Self::Mollie => 0,
            Self::Adyen => 1,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps every supported provider to exactly one adapter.
///
/// Completeness is checked once in [`ProviderRegistry::new`], so a lookup
/// by [`ProviderId`] can never miss at request time.
#[derive(Clone)]
pub struct ProviderRegistry {
    adapters: Vec<Arc<dyn PaymentProvider>>,
}

impl ProviderRegistry {
    pub fn new(adapters: Vec<Arc<dyn PaymentProvider>>) -> Result<Self, ConfigError> {
        let mut ordered = Vec::with_capacity(ProviderId::ALL.len());
        for id in ProviderId::ALL {
            let mut matching = adapters.iter().filter(|a| a.id() == id);
            let adapter = matching.next().ok_or(ConfigError::MissingAdapter(id))?;
            if matching.next().is_some() {
                return Err(ConfigError::DuplicateAdapter(id));
            }
            ordered.push(Arc::clone(adapter));
        }
        Ok(Self { adapters: ordered })
    }

    pub fn adapter(&self, id: ProviderId) -> &Arc<dyn PaymentProvider> {
        &self.adapters[id.index()]
    }

    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.adapters.iter().map(|a| a.id())
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.providers()).finish()
    }
}
