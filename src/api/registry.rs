//! The fixed set of public providers a lookup fans out to.

use crate::models::ProviderSpec;

/// Read-only, ordered collection of provider descriptors.
///
/// Order only affects the order tasks are spawned in, never which results
/// come back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<ProviderSpec>,
}

impl ProviderRegistry {
    /// Builds a registry from an explicit provider list.
    pub fn new(providers: Vec<ProviderSpec>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[ProviderSpec] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    /// The built-in public providers.
    fn default() -> Self {
        Self::new(vec![
            ProviderSpec::new(
                "ipapi.co",
                "https://ipapi.co/1.1.1.1/json/",
                "country_name",
                "city",
                "org",
                "org",
            ),
            ProviderSpec::new(
                "ip-api",
                "http://ip-api.com/json/1.1.1.1",
                "country",
                "city",
                "isp",
                "org",
            ),
            ProviderSpec::new(
                "ipinfo",
                "http://ipinfo.io/1.1.1.1/json",
                "country",
                "city",
                "org",
                "org",
            ),
            ProviderSpec::new(
                "qste",
                "http://ip.qste.com/json?ip=1.1.1.1",
                "country",
                "city",
                "isp",
                "org",
            ),
        ])
    }
}
