// File: src/manifest.rs
// Purpose: Route manifest parsing from routes.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::RouteError;
use crate::registry::Registry;
use crate::route::RouteOptions;

/// A declarative route table, usually loaded from `routes.toml`:
///
/// ```toml
/// [[routes]]
/// name = "about"
/// pattern = "/about"
/// page = "/about-page"
///
/// [[routes]]
/// pattern = "/blog/:slug"
/// page = "blog"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<RouteOptions>,
}

impl RouteManifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing or empty manifest means no declarative routes
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let manifest: RouteManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse route manifest: {:?}", path))?;

        Ok(manifest)
    }

    /// Load from the default path (./routes.toml).
    pub fn load_default() -> Result<Self> {
        Self::load("routes.toml")
    }
}

impl Registry {
    /// Builds a registry from a manifest, registering entries in order.
    ///
    /// Fails on the first invalid entry or duplicate name, like the
    /// programmatic [`Registry::add_route`].
    pub fn from_manifest(manifest: &RouteManifest) -> Result<Self, RouteError> {
        let mut registry = Registry::new();
        for options in &manifest.routes {
            registry.add_route(options.clone())?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let toml = r#"
            [[routes]]
            name = "about"
            pattern = "/about"
            page = "/about-page"

            [[routes]]
            pattern = "/blog/:slug"
            page = "blog"
        "#;
        let manifest: RouteManifest = toml::from_str(toml).unwrap();
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[0].name.as_deref(), Some("about"));
        assert_eq!(manifest.routes[1].name, None);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = toml::from_str::<RouteManifest>("").unwrap_or_default();
        assert!(manifest.routes.is_empty());
    }

    #[test]
    fn test_registry_from_manifest() {
        let toml = r#"
            [[routes]]
            name = "user"
            pattern = "/user/:id"
        "#;
        let manifest: RouteManifest = toml::from_str(toml).unwrap();
        let registry = Registry::from_manifest(&manifest).unwrap();
        assert!(registry.find_by_name("user").is_some());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = RouteManifest::load(dir.path().join("routes.toml")).unwrap();
        assert!(manifest.routes.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        std::fs::write(
            &path,
            r#"
                [[routes]]
                name = "about"
                pattern = "/about"
            "#,
        )
        .unwrap();

        let manifest = RouteManifest::load(&path).unwrap();
        assert_eq!(manifest.routes.len(), 1);
        assert_eq!(manifest.routes[0].name.as_deref(), Some("about"));
    }

    #[test]
    fn test_manifest_duplicate_name_fails() {
        let toml = r#"
            [[routes]]
            name = "user"
            pattern = "/user/:id"

            [[routes]]
            name = "user"
            pattern = "/u/:id"
        "#;
        let manifest: RouteManifest = toml::from_str(toml).unwrap();
        assert!(Registry::from_manifest(&manifest).is_err());
    }
}
