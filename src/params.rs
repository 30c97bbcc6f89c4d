// File: src/params.rs
// Purpose: Dynamic parameter values passed to matching and URL building

use serde_json::{Map, Value};

/// Parameter mapping for route matching and URL construction.
///
/// Iteration order is insertion order (`serde_json` is built with
/// `preserve_order`), and querystring serialization follows it.
pub type Params = Map<String, Value>;

/// Builds a parameter map from `(key, value)` pairs.
///
/// # Examples
///
/// ```
/// use named_routes::params_from;
///
/// let params = params_from([("id", "42"), ("tab", "profile")]);
/// assert_eq!(params.get("id").and_then(|v| v.as_str()), Some("42"));
/// ```
pub fn params_from<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Params
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Renders a value as a plain string for path segments and querystrings.
///
/// `None` means the value is absent (null). Arrays join their rendered
/// elements with `/`; the separator is encoded away later, so joined values
/// survive a round trip through a querystring.
pub(crate) fn plain_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| plain_value(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("/"),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
