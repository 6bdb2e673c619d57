//! Dotted field-path lookups into a parsed JSON document.
//!
//! `"data.country"` walks into the `data` object and reads `country`.
//! Numeric segments index into arrays. Any segment that is missing or hits
//! the wrong kind of value yields an empty string instead of an error.

use serde_json::Value;

/// Resolves `path` against `doc` and renders the leaf as text.
///
/// Strings come back unquoted, numbers and booleans in their JSON form;
/// `null`, objects and arrays count as absent.
pub fn extract(doc: &Value, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut current = doc;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return String::new(),
        }
    }

    match current {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Object(_) | Value::Array(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "country": "Wakanda",
            "asn": 15169,
            "bogon": false,
            "postal": null,
            "data": {
                "country": "Genovia",
                "owner": { "name": "Royal Telecom" },
                "ranges": ["10.0.0.0/8", "192.168.0.0/16"]
            }
        })
    }

    #[rstest]
    #[case("country", "Wakanda")]
    #[case("data.country", "Genovia")]
    #[case("data.owner.name", "Royal Telecom")]
    #[case("data.ranges.1", "192.168.0.0/16")]
    #[case("asn", "15169")]
    #[case("bogon", "false")]
    fn test_extract_present_paths(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(extract(&doc(), path), expected);
    }

    #[rstest]
    #[case("isp")]
    #[case("")]
    #[case("postal")]
    #[case("data")]
    #[case("data.ranges")]
    #[case("data.ranges.7")]
    #[case("data.ranges.first")]
    #[case("country.name")]
    #[case("data..country")]
    fn test_extract_missing_or_mismatched_paths(#[case] path: &str) {
        assert_eq!(extract(&doc(), path), "");
    }

    #[test]
    fn test_extract_from_non_object_root() {
        assert_eq!(extract(&json!("just a string"), "country"), "");
        assert_eq!(extract(&json!([{"country": "X"}]), "0.country"), "X");
    }
}
