//! The normalized record produced for every provider queried during a lookup.

use serde::Serialize;
use std::fmt;

/// Outcome of querying a single provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    /// HTTP 200 with a JSON body; fields were extracted.
    Ok,
    /// The request never produced a response (DNS, refused connection, TLS...).
    Transport,
    /// No response within the per-provider timeout.
    Timeout,
    /// The provider answered with a status other than 200.
    BadStatus(u16),
    /// The body was not valid JSON.
    Parse,
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupStatus::Ok => write!(f, "ok"),
            LookupStatus::Transport => write!(f, "transport error"),
            LookupStatus::Timeout => write!(f, "timed out"),
            LookupStatus::BadStatus(code) => write!(f, "HTTP {}", code),
            LookupStatus::Parse => write!(f, "malformed JSON"),
        }
    }
}

/// Result of one provider query.
///
/// A failed query carries empty strings in every data field; an empty
/// `country_name` is what consumers use to skip a record. `provider` and
/// `status` are always set so failures can still be attributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    pub provider: String,
    pub status: LookupStatus,
    pub ip: String,
    pub country_name: String,
    pub city: String,
    pub isp: String,
    pub org: String,
    pub source_url: String,
}

/// How the ISP and organization should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership<'a> {
    Combined(&'a str),
    Split { isp: &'a str, org: &'a str },
}

impl LookupResult {
    /// An all-empty record for a provider that produced no usable data.
    pub fn failed(provider: &str, status: LookupStatus) -> Self {
        Self {
            provider: provider.to_string(),
            status,
            ip: String::new(),
            country_name: String::new(),
            city: String::new(),
            isp: String::new(),
            org: String::new(),
            source_url: String::new(),
        }
    }

    pub fn is_usable(&self) -> bool {
        !self.country_name.is_empty()
    }

    /// Case-insensitive equality of `isp` and `org`. Near-duplicates such as
    /// "Google" and "Google LLC" are deliberately treated as different.
    pub fn isp_matches_org(&self) -> bool {
        self.isp
            .chars()
            .flat_map(char::to_lowercase)
            .eq(self.org.chars().flat_map(char::to_lowercase))
    }

    pub fn ownership(&self) -> Ownership<'_> {
        if self.isp_matches_org() {
            Ownership::Combined(&self.isp)
        } else {
            Ownership::Split {
                isp: &self.isp,
                org: &self.org,
            }
        }
    }
}
