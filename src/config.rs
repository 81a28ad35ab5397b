//! Application configuration.
//!
//! Every field has a default matching the deployed app, so an empty JSON
//! object (or `AppConfig::default()`) is a valid configuration.

use serde::Deserialize;

use crate::error::PlaceError;
use crate::notify::DEFAULT_TOAST_DURATION_MS;

/// Five mebibytes, the largest image accepted from the file picker.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Remote collection holding the shared list.
    pub collection: String,
    /// Upper bound on selected image size, in bytes.
    pub max_image_bytes: u64,
    /// How long a toast stays on screen.
    pub toast_duration_ms: u64,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collection: "sharedPlaces".into(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, PlaceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Offline asset cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Current cache version. Any other cache is dropped on activation.
    pub name: String,
    /// Static asset paths fetched at install.
    pub precache: Vec<String>,
    /// Host fragments that always go to the network.
    pub bypass_hosts: Vec<String>,
    /// Path fragments that always go to the network.
    pub bypass_paths: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "places-app-v1".into(),
            precache: ["/", "/index.html", "/style.css", "/app.js", "/manifest.json"]
                .into_iter()
                .map(String::from)
                .collect(),
            bypass_hosts: ["firebase", "firebaseapp.com", "googleapis.com", "google.com"]
                .into_iter()
                .map(String::from)
                .collect(),
            bypass_paths: vec!["__/auth/".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_image_bytes, 5 * 1024 * 1024);
        assert_eq!(config.cache.precache.len(), 5);
    }

    #[test]
    fn partial_override() {
        let config =
            AppConfig::from_json(r#"{"collection":"places","cache":{"name":"v2"}}"#).unwrap();
        assert_eq!(config.collection, "places");
        assert_eq!(config.cache.name, "v2");
        assert_eq!(config.cache.bypass_paths, vec!["__/auth/".to_string()]);
        assert_eq!(config.toast_duration_ms, 3000);
    }

    #[test]
    fn malformed_json_is_serde_error() {
        let err = AppConfig::from_json("{").unwrap_err();
        assert!(matches!(err, PlaceError::Serde(_)));
    }
}
