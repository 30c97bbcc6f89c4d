// File: src/nav.rs
// Purpose: Navigation wrappers over a host router

use crate::error::RouteError;
use crate::params::Params;
use crate::registry::Registry;

/// Host navigation entry points.
///
/// Each accepts the resolved `(href, as, extra)` triple; the host decides
/// what pushing, replacing, and prefetching mean.
pub trait Navigator {
    fn push(&self, href: &str, as_path: &str, extra: &Params);
    fn replace(&self, href: &str, as_path: &str, extra: &Params);
    fn prefetch(&self, href: &str, as_path: &str, extra: &Params);
}

/// Wraps a host [`Navigator`] so callers navigate by route name or URL.
///
/// Each `*_route` method resolves `(name_or_url, params)` through the
/// registry before delegating. The host's `extra` argument receives
/// `options` when resolution was by name and `params` when the input fell
/// through as a literal URL.
pub struct RouteNavigator<'r, N> {
    registry: &'r Registry,
    navigator: N,
}

impl<'r, N: Navigator> RouteNavigator<'r, N> {
    pub fn new(registry: &'r Registry, navigator: N) -> Self {
        Self {
            registry,
            navigator,
        }
    }

    /// The wrapped host navigator.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn push_route(
        &self,
        name_or_url: &str,
        params: &Params,
        options: &Params,
    ) -> Result<(), RouteError> {
        self.resolve_and(name_or_url, params, options, N::push)
    }

    pub fn replace_route(
        &self,
        name_or_url: &str,
        params: &Params,
        options: &Params,
    ) -> Result<(), RouteError> {
        self.resolve_and(name_or_url, params, options, N::replace)
    }

    pub fn prefetch_route(
        &self,
        name_or_url: &str,
        params: &Params,
        options: &Params,
    ) -> Result<(), RouteError> {
        self.resolve_and(name_or_url, params, options, N::prefetch)
    }

    fn resolve_and(
        &self,
        name_or_url: &str,
        params: &Params,
        options: &Params,
        go: impl FnOnce(&N, &str, &str, &Params),
    ) -> Result<(), RouteError> {
        let resolved = self.registry.find_and_get_urls(name_or_url, params)?;
        let extra = if resolved.by_name { options } else { params };
        go(
            &self.navigator,
            &resolved.urls.href,
            &resolved.urls.as_path,
            extra,
        );
        Ok(())
    }
}
