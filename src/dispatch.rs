// File: src/dispatch.rs
// Purpose: Request dispatch into a host rendering framework

use tracing::debug;

use crate::params::Params;
use crate::query::ParsedUrl;
use crate::registry::Registry;
use crate::route::Route;

/// Outcome of routing one request URL.
#[derive(Debug)]
pub enum Dispatch<'a> {
    /// A registered route matched: render `route.page` with the merged query.
    Page { route: &'a Route, query: Params },
    /// No route matched: hand the parsed URL to the host's default handling.
    Fallback { parsed: ParsedUrl },
}

/// Host rendering entry point.
///
/// Supplied by the composition root; the registry never renders anything
/// itself.
pub trait PageHost {
    type Response;

    /// Render the page identified by `page` with the given parameters.
    fn render_page(&self, page: &str, query: &Params) -> Self::Response;

    /// Default handling for URLs no registered route matched.
    fn render_fallback(&self, parsed: &ParsedUrl) -> Self::Response;
}

impl Registry {
    /// Routes one request URL.
    pub fn dispatch(&self, url: &str) -> Dispatch<'_> {
        let matched = self.match_url(url);
        match matched.route {
            Some(route) => {
                debug!(page = %route.page, "dispatching to page");
                Dispatch::Page {
                    route,
                    query: matched.query,
                }
            }
            None => Dispatch::Fallback {
                parsed: matched.parsed,
            },
        }
    }
}

/// Wires a registry and a host into a request-handling closure.
///
/// # Examples
///
/// ```
/// use named_routes::{request_handler, PageHost, Params, ParsedUrl, Registry};
///
/// struct Host;
///
/// impl PageHost for Host {
///     type Response = String;
///     fn render_page(&self, page: &str, _query: &Params) -> String {
///         format!("page:{page}")
///     }
///     fn render_fallback(&self, parsed: &ParsedUrl) -> String {
///         format!("fallback:{}", parsed.pathname)
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.add("user", Some("/user/:id"), None).unwrap();
///
/// let host = Host;
/// let handler = request_handler(&registry, &host);
/// assert_eq!(handler("/user/42"), "page:/user");
/// assert_eq!(handler("/missing"), "fallback:/missing");
/// ```
pub fn request_handler<'a, H: PageHost>(
    registry: &'a Registry,
    host: &'a H,
) -> impl Fn(&str) -> H::Response + 'a {
    move |url| match registry.dispatch(url) {
        Dispatch::Page { route, query } => host.render_page(&route.page, &query),
        Dispatch::Fallback { parsed } => host.render_fallback(&parsed),
    }
}
