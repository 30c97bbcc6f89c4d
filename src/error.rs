// File: src/error.rs
// Purpose: Error types for route registration and URL building

/// Errors raised by route construction, registration, and URL building.
///
/// No-match is never an error: `Route::matches` and `Registry::match_url`
/// signal "fall through to default handling" with `None` instead.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Route constructed with neither a name nor a page to render.
    #[error("missing page to render for route \"{pattern}\"")]
    MissingPage { pattern: String },

    /// A route with this name is already registered.
    #[error("route \"{name}\" already exists")]
    DuplicateName { name: String },

    /// The pattern failed to compile, or there was no name to derive one from.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Reverse path-building is missing a value for a required parameter.
    #[error("missing value for parameter \"{param}\" in pattern \"{pattern}\"")]
    MissingParam { param: String, pattern: String },
}
