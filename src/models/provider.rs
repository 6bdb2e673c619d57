//! Describes a single IP-geolocation provider: where to send the request and
//! where each attribute lives in the JSON it answers with.

use serde::Serialize;

/// Literal address embedded in every URL template, swapped for the target IP.
pub const PLACEHOLDER_IP: &str = "1.1.1.1";

/// Static description of one provider endpoint and its response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSpec {
    /// Short human-readable label, used only for display and logging.
    pub name: String,
    /// Request URL containing [`PLACEHOLDER_IP`].
    pub url_template: String,
    /// Dot-separated path to the country name.
    pub country_path: String,
    /// Dot-separated path to the city.
    pub city_path: String,
    /// Dot-separated path to the ISP.
    pub isp_path: String,
    /// Dot-separated path to the owning organization.
    pub org_path: String,
}

impl ProviderSpec {
    pub fn new(
        name: &str,
        url_template: &str,
        country_path: &str,
        city_path: &str,
        isp_path: &str,
        org_path: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            url_template: url_template.to_string(),
            country_path: country_path.to_string(),
            city_path: city_path.to_string(),
            isp_path: isp_path.to_string(),
            org_path: org_path.to_string(),
        }
    }

    /// Builds the request URL for `ip` by literal substring replacement.
    ///
    /// The address is not validated; a malformed one is passed through and
    /// left for the HTTP layer to reject.
    pub fn url_for(&self, ip: &str) -> String {
        self.url_template.replace(PLACEHOLDER_IP, ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn provider_with(template: &str) -> ProviderSpec {
        ProviderSpec::new("test", template, "country", "city", "isp", "org")
    }

    #[rstest]
    #[case("https://ipapi.co/1.1.1.1/json/", "8.8.8.8", "https://ipapi.co/8.8.8.8/json/")]
    #[case("http://ip-api.com/json/1.1.1.1", "192.168.10.254", "http://ip-api.com/json/192.168.10.254")]
    #[case("http://ip.qste.com/json?ip=1.1.1.1", "2001:db8::1", "http://ip.qste.com/json?ip=2001:db8::1")]
    fn test_url_for_substitutes_placeholder(
        #[case] template: &str,
        #[case] ip: &str,
        #[case] expected: &str,
    ) {
        let url = provider_with(template).url_for(ip);
        assert_eq!(url, expected);
        assert!(url.contains(ip));
        assert!(!url.contains(PLACEHOLDER_IP));
    }

    #[test]
    fn test_url_for_replaces_every_occurrence() {
        let url = provider_with("http://example.test/1.1.1.1?echo=1.1.1.1").url_for("9.9.9.9");
        assert_eq!(url, "http://example.test/9.9.9.9?echo=9.9.9.9");
    }

    #[test]
    fn test_url_for_passes_invalid_address_through() {
        let url = provider_with("http://example.test/json/1.1.1.1").url_for("not-an-ip");
        assert_eq!(url, "http://example.test/json/not-an-ip");
    }
}
