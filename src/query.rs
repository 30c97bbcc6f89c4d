// File: src/query.rs
// Purpose: Querystring serialization and URL parsing

use std::borrow::Cow;

use serde_json::map::Entry;
use serde_json::Value;

use crate::params::{plain_value, Params};

/// A URL split into its path and parsed query components.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    /// Path component, without query or fragment.
    pub pathname: String,
    /// Decoded query parameters, in declaration order.
    pub query: Params,
}

/// Serializes a parameter map into a querystring.
///
/// Null values are dropped. Array values are joined with `/` before
/// encoding. Keys and values are percent-encoded, pairs joined with `&`,
/// in the map's iteration order.
///
/// # Examples
///
/// ```
/// use named_routes::{params_from, to_querystring};
/// use serde_json::json;
///
/// let params = params_from([("a", json!([1, 2])), ("b", json!(null)), ("c", json!("x y"))]);
/// assert_eq!(to_querystring(&params), "a=1%2F2&c=x%20y");
/// ```
pub fn to_querystring(params: &Params) -> String {
    params
        .iter()
        .filter_map(|(key, value)| {
            let value = plain_value(value)?;
            Some(format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value)
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a raw URL into a path and a query-parameter map.
///
/// The fragment is discarded. Repeated keys collect into an array, in
/// first-seen position.
///
/// # Examples
///
/// ```
/// use named_routes::parse_url;
///
/// let parsed = parse_url("/user/42?tab=profile&lang=en#bio");
/// assert_eq!(parsed.pathname, "/user/42");
/// assert_eq!(parsed.query.get("tab").and_then(|v| v.as_str()), Some("profile"));
/// ```
pub fn parse_url(url: &str) -> ParsedUrl {
    let without_fragment = url.split('#').next().unwrap_or("");
    let (pathname, query_str) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    };

    let mut query = Params::new();
    if let Some(raw) = query_str {
        for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_query_component(key);
            let value = Value::String(decode_query_component(value));

            match query.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match slot.get_mut() {
                    Value::Array(items) => items.push(value),
                    existing => {
                        let first = existing.take();
                        *existing = Value::Array(vec![first, value]);
                    }
                },
            }
        }
    }

    ParsedUrl {
        pathname: pathname.to_string(),
        query,
    }
}

/// Percent-decodes a path capture. Invalid sequences fall back to the raw
/// input rather than failing the whole match.
pub(crate) fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Querystrings additionally treat `+` as a space.
fn decode_query_component(raw: &str) -> String {
    decode_component(&raw.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::params_from;
    use serde_json::json;

    #[test]
    fn test_querystring_order_and_encoding() {
        let params = params_from([("lang", json!("en")), ("q", json!("x y"))]);
        assert_eq!(to_querystring(&params), "lang=en&q=x%20y");
    }

    #[test]
    fn test_querystring_drops_null() {
        let params = params_from([("a", json!(null))]);
        assert_eq!(to_querystring(&params), "");
    }

    #[test]
    fn test_querystring_joins_arrays() {
        let params = params_from([("slug", json!(["guide", "intro"]))]);
        assert_eq!(to_querystring(&params), "slug=guide%2Fintro");
    }

    #[test]
    fn test_parse_url_plain_path() {
        let parsed = parse_url("/about");
        assert_eq!(parsed.pathname, "/about");
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn test_parse_url_decodes_query() {
        let parsed = parse_url("/search?q=hello%20world&page=2");
        assert_eq!(parsed.query.get("q"), Some(&json!("hello world")));
        assert_eq!(parsed.query.get("page"), Some(&json!("2")));
    }

    #[test]
    fn test_parse_url_plus_as_space() {
        let parsed = parse_url("/search?q=hello+world");
        assert_eq!(parsed.query.get("q"), Some(&json!("hello world")));
    }

    #[test]
    fn test_parse_url_repeated_keys() {
        let parsed = parse_url("/filter?tag=a&tag=b");
        assert_eq!(parsed.query.get("tag"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_parse_url_strips_fragment() {
        let parsed = parse_url("/about#team");
        assert_eq!(parsed.pathname, "/about");
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn test_parse_url_valueless_key() {
        let parsed = parse_url("/page?flag");
        assert_eq!(parsed.query.get("flag"), Some(&json!("")));
    }
}
