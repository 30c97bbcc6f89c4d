//! Routes: construction, matching, and bidirectional URL building.
//!
//! A [`Route`] pairs a public-facing path pattern with the identifier of the
//! page that renders it. It produces two URLs from one parameter map:
//!
//! - `as`: the public path, pattern with parameters substituted and any
//!   leftover parameters spilled into a querystring
//! - `href`: the internal rendering URL, page identifier plus *every*
//!   parameter as a query value

pub mod pattern;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RouteError;
use crate::params::Params;
use crate::query::{decode_component, to_querystring};
use pattern::CompiledPattern;

/// Construction options for a [`Route`].
///
/// At least one of `name` or `page` must be non-empty. `pattern` defaults to
/// `/{name}`, `page` defaults to `name`. Also the manifest entry shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOptions {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    /// Whether literal pattern segments match case-insensitively (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            name: None,
            pattern: None,
            page: None,
            case_insensitive: true,
        }
    }
}

/// The resolved URL pair for one route and one parameter map.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteUrls {
    /// Public-facing path (`as`): pattern with parameters substituted.
    pub as_path: String,
    /// Internal rendering URL: page identifier plus all parameters as query.
    pub href: String,
}

/// A single named route. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Route {
    /// Optional unique identifier, used for by-name resolution.
    pub name: Option<String>,
    /// Path template, e.g. `/users/:id`.
    pub pattern: String,
    /// Identifier of the backing page, normalized to one leading slash.
    pub page: String,
    compiled: CompiledPattern,
    case_insensitive: bool,
}

impl Route {
    /// Builds a route, compiling its pattern once.
    ///
    /// # Examples
    ///
    /// ```
    /// use named_routes::{Route, RouteOptions};
    ///
    /// let route = Route::new(RouteOptions {
    ///     name: Some("user".into()),
    ///     pattern: Some("/user/:id".into()),
    ///     ..Default::default()
    /// }).unwrap();
    ///
    /// assert_eq!(route.page, "/user");
    /// assert_eq!(route.param_names(), ["id"]);
    /// ```
    pub fn new(options: RouteOptions) -> Result<Self, RouteError> {
        let name = options.name.filter(|name| !name.is_empty());
        let pattern_opt = options.pattern.filter(|pattern| !pattern.is_empty());

        let page = match options.page.filter(|page| !page.is_empty()).or_else(|| name.clone()) {
            Some(page) => page,
            None => {
                return Err(RouteError::MissingPage {
                    pattern: pattern_opt.unwrap_or_default(),
                })
            }
        };

        let pattern = match pattern_opt.or_else(|| name.as_ref().map(|name| format!("/{name}"))) {
            Some(pattern) => pattern,
            None => {
                return Err(RouteError::InvalidPattern {
                    pattern: String::new(),
                    reason: "no pattern given and no name to derive one from".to_string(),
                })
            }
        };

        let compiled = CompiledPattern::compile(&pattern)?;

        Ok(Self {
            name,
            pattern,
            page: normalize_page(&page),
            compiled,
            case_insensitive: options.case_insensitive,
        })
    }

    /// Names of the pattern's capturing segments, in declaration order.
    pub fn param_names(&self) -> &[String] {
        self.compiled.param_names()
    }

    /// Matches a request path, extracting named parameters.
    ///
    /// Returns `None` on no match. On match, structurally absent captures
    /// (unconsumed optionals) are omitted; present captures are
    /// percent-decoded. The resulting map may be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use named_routes::{Route, RouteOptions};
    ///
    /// let route = Route::new(RouteOptions {
    ///     name: Some("user".into()),
    ///     pattern: Some("/user/:id".into()),
    ///     ..Default::default()
    /// }).unwrap();
    ///
    /// let params = route.matches("/user/42").unwrap();
    /// assert_eq!(params.get("id").and_then(|v| v.as_str()), Some("42"));
    /// assert!(route.matches("/other").is_none());
    /// ```
    pub fn matches(&self, path: &str) -> Option<Params> {
        let captures = self.compiled.matches(path, self.case_insensitive)?;

        let mut params = Params::new();
        for (name, capture) in self.compiled.param_names().iter().zip(captures) {
            if let Some(raw) = capture {
                params.insert(name.clone(), Value::String(decode_component(&raw)));
            }
        }
        Some(params)
    }

    /// The internal rendering URL: `{page}?{querystring}`.
    ///
    /// Every non-null parameter is carried as a query value, including ones
    /// the pattern would consume as path segments: `page` is a page
    /// identifier, not a route pattern.
    pub fn get_href(&self, params: &Params) -> String {
        format!("{}?{}", self.page, to_querystring(params))
    }

    /// The public-facing URL: pattern with parameters substituted.
    ///
    /// Parameters not consumed by path substitution spill into a
    /// querystring. An empty rendered path becomes `/`.
    ///
    /// Fails with [`RouteError::MissingParam`] when a required pattern
    /// segment has no value.
    pub fn get_as(&self, params: &Params) -> Result<String, RouteError> {
        let path = self.compiled.build(params)?;
        let as_path = if path.is_empty() { "/".to_string() } else { path };

        let leftover: Params = params
            .iter()
            .filter(|(key, _)| !self.compiled.param_names().iter().any(|name| name == *key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if leftover.is_empty() {
            return Ok(as_path);
        }
        Ok(format!("{}?{}", as_path, to_querystring(&leftover)))
    }

    /// Both URLs for one parameter map. Build errors propagate.
    pub fn get_urls(&self, params: &Params) -> Result<RouteUrls, RouteError> {
        Ok(RouteUrls {
            as_path: self.get_as(params)?,
            href: self.get_href(params),
        })
    }
}

/// Strips a trailing `/index` segment and pins exactly one leading slash.
///
/// `index` → `/`, `foo/index` → `/foo`, `users` → `/users`.
fn normalize_page(page: &str) -> String {
    let stripped = if page == "index" || page == "/index" {
        ""
    } else {
        page.strip_suffix("/index").unwrap_or(page)
    };
    format!("/{}", stripped.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page() {
        assert_eq!(normalize_page("index"), "/");
        assert_eq!(normalize_page("/index"), "/");
        assert_eq!(normalize_page("foo/index"), "/foo");
        assert_eq!(normalize_page("/foo/index"), "/foo");
        assert_eq!(normalize_page("users"), "/users");
        assert_eq!(normalize_page("/users"), "/users");
        assert_eq!(normalize_page("myindex"), "/myindex");
    }
}
