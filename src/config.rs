//! # Spec Configuration
//!
//! Document-level settings, read from environment variables.
//!
//! ## Environment Variables
//!
//! | Variable                          | Default                  |
//! |-----------------------------------|--------------------------|
//! | `OPSPEC_TITLE`                    | `Service API Document`   |
//! | `OPSPEC_VERSION`                  | `0.1`                    |
//! | `OPSPEC_OPENAPI_VERSION`          | `3.1.0`                  |
//! | `OPSPEC_VALIDATION_ERROR_STATUS`  | `422`                    |
//! | `OPSPEC_PATH`                     | `doc`                    |
//! | `OPSPEC_FILENAME`                 | `openapi.json`           |
//!
//! `OPSPEC_VALIDATION_ERROR_STATUS` is the status code under which a
//! `Validation Error` response is documented for handlers with models.
//! Values that are not a valid HTTP status code fall back to the default.
//!
//! ```rust
//! use opspec::config::SpecConfig;
//!
//! let config = SpecConfig::from_env();
//! println!("documenting validation errors as {}", config.validation_error_status);
//! ```

use std::env;

pub const DEFAULT_VALIDATION_ERROR_STATUS: u16 = 422;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecConfig {
    /// `info.title` of the generated document
    pub title: String,
    /// `info.version` of the generated document
    pub version: String,
    pub openapi_version: String,
    pub validation_error_status: u16,
    /// URL prefix the serving layer exposes the document under
    pub path: String,
    pub filename: String,
}

impl Default for SpecConfig {
    fn default() -> Self {
        SpecConfig {
            title: "Service API Document".to_string(),
            version: "0.1".to_string(),
            openapi_version: "3.1.0".to_string(),
            validation_error_status: DEFAULT_VALIDATION_ERROR_STATUS,
            path: "doc".to_string(),
            filename: "openapi.json".to_string(),
        }
    }
}

impl SpecConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SpecConfig::default();
        SpecConfig {
            title: lookup("OPSPEC_TITLE").unwrap_or(defaults.title),
            version: lookup("OPSPEC_VERSION").unwrap_or(defaults.version),
            openapi_version: lookup("OPSPEC_OPENAPI_VERSION").unwrap_or(defaults.openapi_version),
            validation_error_status: lookup("OPSPEC_VALIDATION_ERROR_STATUS")
                .and_then(|s| s.trim().parse::<u16>().ok())
                .filter(|code| (100..=599).contains(code))
                .unwrap_or(defaults.validation_error_status),
            path: lookup("OPSPEC_PATH").unwrap_or(defaults.path),
            filename: lookup("OPSPEC_FILENAME").unwrap_or(defaults.filename),
        }
    }

    /// Where the serving layer publishes the document, e.g. `/doc/openapi.json`.
    pub fn document_url(&self) -> String {
        format!(
            "/{}/{}",
            self.path.trim_matches('/'),
            self.filename.trim_start_matches('/')
        )
    }
}
