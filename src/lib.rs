//! # named-routes
//!
//! A named-route registry and URL-resolution helper for file-based routing
//! frameworks, with support for:
//! - Named routes (`user` → `/user/:id`)
//! - Dynamic parameters (`/users/:id`)
//! - Optional parameters (`/posts/:id?`)
//! - Catch-all segments (`/docs/*slug`)
//! - Anonymous routes registered pattern-first (`/blog/:slug`)
//!
//! Every route resolves to a pair of URLs: the public-facing path (`as`,
//! pattern with parameters substituted and leftovers spilled into a
//! querystring) and the internal rendering URL (`href`, page identifier
//! plus every parameter as a query value). Resolution is dual-mode:
//! callers pass either a symbolic name or a raw path and the registry
//! figures out which.
//!
//! The host framework stays on the other side of small traits:
//! [`PageHost`] for request dispatch, [`Navigator`] for push/replace/
//! prefetch navigation, and [`LinkRenderer`] for link components.
//!
//! ## Example
//!
//! ```
//! use named_routes::{params_from, Registry};
//!
//! let mut registry = Registry::new();
//! registry.add("user", Some("/user/:id"), None).unwrap();
//!
//! let route = registry.find_by_name("user").unwrap();
//! let params = params_from([("id", "42"), ("tab", "profile")]);
//!
//! assert_eq!(route.get_as(&params).unwrap(), "/user/42?tab=profile");
//! assert_eq!(route.get_href(&params), "/user?id=42&tab=profile");
//!
//! let matched = registry.match_url("/user/42");
//! assert_eq!(matched.route.unwrap().name.as_deref(), Some("user"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod dispatch;
mod error;
mod link;
mod manifest;
mod nav;
mod params;
mod query;
mod registry;
pub mod route;

// ============================================================================
// Public API
// ============================================================================

pub use dispatch::{request_handler, Dispatch, PageHost};
pub use error::RouteError;
pub use link::{render_link, resolve_link, resolve_link_or_log, LinkRenderer};
pub use manifest::RouteManifest;
pub use nav::{Navigator, RouteNavigator};
pub use params::{params_from, Params};
pub use query::{parse_url, to_querystring, ParsedUrl};
pub use registry::{Registry, Resolved, UrlMatch};
pub use route::pattern::{classify_segment, CompiledPattern, PatternSegment};
pub use route::{Route, RouteOptions, RouteUrls};
