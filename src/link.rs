// File: src/link.rs
// Purpose: Link resolution for UI bindings

use tracing::error;

use crate::error::RouteError;
use crate::params::Params;
use crate::registry::Registry;
use crate::route::RouteUrls;

/// Resolves a link target (route name or literal URL) into an `href`/`as`
/// pair, appending `#hash` to the public path when given.
pub fn resolve_link(
    registry: &Registry,
    target: &str,
    params: &Params,
    hash: Option<&str>,
) -> Result<RouteUrls, RouteError> {
    let resolved = registry.find_and_get_urls(target, params)?;
    let mut urls = resolved.urls;
    if let Some(hash) = hash {
        urls.as_path = format!("{}#{}", urls.as_path, hash);
    }
    Ok(urls)
}

/// Like [`resolve_link`], but failures are logged and suppressed.
///
/// A link component must not throw into the view tree; it renders with
/// undefined URLs instead.
pub fn resolve_link_or_log(
    registry: &Registry,
    target: &str,
    params: &Params,
    hash: Option<&str>,
) -> Option<RouteUrls> {
    match resolve_link(registry, target, params, hash) {
        Ok(urls) => Some(urls),
        Err(err) => {
            error!("link resolution failed for \"{}\": {}", target, err);
            None
        }
    }
}

/// Underlying link-rendering primitive, supplied by the host UI layer.
///
/// Implementations carry whatever extra properties their link element needs
/// and forward them alongside the resolved pair.
pub trait LinkRenderer {
    type Output;

    /// `None` means resolution failed and was suppressed.
    fn render_link(&self, urls: Option<&RouteUrls>) -> Self::Output;
}

/// Resolves a target and hands the result to the renderer.
pub fn render_link<R: LinkRenderer>(
    registry: &Registry,
    renderer: &R,
    target: &str,
    params: &Params,
    hash: Option<&str>,
) -> R::Output {
    let urls = resolve_link_or_log(registry, target, params, hash);
    renderer.render_link(urls.as_ref())
}
