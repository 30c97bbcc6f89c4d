//! The route registry: ordered registration, lookup, and URL resolution.
//!
//! Routes are scanned in registration order and the first match wins. Names
//! are unique. Resolution is dual-mode (a symbolic name first, then a
//! literal URL fallback) so callers can pass either transparently.

use tracing::debug;

use crate::error::RouteError;
use crate::params::Params;
use crate::query::{parse_url, ParsedUrl};
use crate::route::{Route, RouteOptions, RouteUrls};

/// Result of matching a URL against the registry.
#[derive(Debug)]
pub struct UrlMatch<'a> {
    /// The URL split into path and raw query parameters.
    pub parsed: ParsedUrl,
    /// Query parameters with matched path parameters merged over them
    /// (path parameters win on key collision).
    pub query: Params,
    /// The first route whose pattern matched, in registration order.
    pub route: Option<&'a Route>,
    /// Parameters extracted from the path by the matching route.
    pub params: Option<Params>,
}

/// Result of dual-mode resolution via [`Registry::find_and_get_urls`].
#[derive(Debug)]
pub struct Resolved<'a> {
    /// The route that resolved the input, if any.
    pub route: Option<&'a Route>,
    /// The `href`/`as` URL pair.
    pub urls: RouteUrls,
    /// True when the input resolved as a symbolic name rather than a URL.
    pub by_name: bool,
}

/// An ordered collection of named routes.
///
/// Built once at application startup, read-mostly afterwards. There is no
/// removal operation.
///
/// # Examples
///
/// ```
/// use named_routes::Registry;
///
/// let mut registry = Registry::new();
/// registry.add("about", Some("/about"), Some("/about-page")).unwrap();
/// assert!(registry.find_by_name("about").is_some());
/// ```
#[derive(Debug)]
pub struct Registry {
    routes: Vec<Route>,
    case_insensitive: bool,
}

impl Registry {
    /// Creates an empty registry. Literal pattern segments match
    /// case-insensitively by default.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            case_insensitive: true,
        }
    }

    /// Configures case sensitivity for routes added afterwards.
    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Registers a route positionally: `(name, pattern, page)`.
    ///
    /// A first argument starting with `/` is reinterpreted as the pattern,
    /// the second argument becomes the page, and the route is anonymous:
    ///
    /// ```
    /// use named_routes::Registry;
    ///
    /// let mut registry = Registry::new();
    /// registry.add("/blog/:slug", Some("blog"), None).unwrap();
    ///
    /// let matched = registry.match_url("/blog/hello-world");
    /// assert_eq!(matched.route.unwrap().page, "/blog");
    /// ```
    ///
    /// Fails with [`RouteError::DuplicateName`] when the name is taken;
    /// the collection is left unchanged. Returns the registry for chaining.
    pub fn add(
        &mut self,
        name: &str,
        pattern: Option<&str>,
        page: Option<&str>,
    ) -> Result<&mut Self, RouteError> {
        let options = if name.starts_with('/') {
            RouteOptions {
                name: None,
                pattern: Some(name.to_string()),
                page: pattern.map(str::to_string),
                case_insensitive: self.case_insensitive,
            }
        } else {
            RouteOptions {
                name: Some(name.to_string()),
                pattern: pattern.map(str::to_string),
                page: page.map(str::to_string),
                case_insensitive: self.case_insensitive,
            }
        };
        self.add_route(options)
    }

    /// Registers a route from construction options.
    pub fn add_route(&mut self, options: RouteOptions) -> Result<&mut Self, RouteError> {
        if let Some(name) = options.name.as_deref().filter(|name| !name.is_empty()) {
            if self.find_by_name(name).is_some() {
                return Err(RouteError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        let route = Route::new(options)?;
        self.routes.push(route);
        Ok(self)
    }

    /// Finds a route by name. Empty names never resolve.
    pub fn find_by_name(&self, name: &str) -> Option<&Route> {
        if name.is_empty() {
            return None;
        }
        self.routes
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }

    /// Matches a URL against all routes in registration order.
    ///
    /// The first route whose pattern matches the path wins, even if a later
    /// route would also match. On a match, path parameters are merged over
    /// the parsed query parameters. With no match, only the parsed URL and
    /// raw query are returned.
    pub fn match_url(&self, url: &str) -> UrlMatch<'_> {
        let parsed = parse_url(url);

        for route in &self.routes {
            if let Some(params) = route.matches(&parsed.pathname) {
                debug!(pattern = %route.pattern, path = %parsed.pathname, "route matched");

                let mut query = parsed.query.clone();
                for (key, value) in &params {
                    query.insert(key.clone(), value.clone());
                }

                return UrlMatch {
                    parsed,
                    query,
                    route: Some(route),
                    params: Some(params),
                };
            }
        }

        debug!(path = %parsed.pathname, "no route matched");
        let query = parsed.query.clone();
        UrlMatch {
            parsed,
            query,
            route: None,
            params: None,
        }
    }

    /// Resolves a symbolic name or a literal URL into an `href`/`as` pair.
    ///
    /// Name-first: when `name_or_url` is a registered name, the pair comes
    /// from that route's [`Route::get_urls`] and `by_name` is true. Otherwise
    /// the input is treated as a literal URL: `as` is the input itself and
    /// `href` is the matching route's internal URL over the merged query, or
    /// the input again when nothing matches.
    pub fn find_and_get_urls<'a>(
        &'a self,
        name_or_url: &str,
        params: &Params,
    ) -> Result<Resolved<'a>, RouteError> {
        if let Some(route) = self.find_by_name(name_or_url) {
            let urls = route.get_urls(params)?;
            return Ok(Resolved {
                route: Some(route),
                urls,
                by_name: true,
            });
        }

        let matched = self.match_url(name_or_url);
        let href = match matched.route {
            Some(route) => route.get_href(&matched.query),
            None => name_or_url.to_string(),
        };

        Ok(Resolved {
            route: matched.route,
            urls: RouteUrls {
                as_path: name_or_url.to_string(),
                href,
            },
            by_name: false,
        })
    }

    /// All registered routes, in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
