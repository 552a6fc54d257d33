//! Configuration for the FCAL translator.
//!
//! [`AppConfig`] is the root of the configuration file. It implements
//! [`serde::Deserialize`] so it can be loaded from TOML:
//!
//! ```toml
//! [target]
//! runtime_header = "runtime/Matrix.h"
//! include_preamble = true
//! ```
//!
//! Every field is optional and falls back to its default.
//!
//! ```
//! # use fcal::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.target().runtime_header(), "Matrix.h");
//! ```

use serde::Deserialize;

use fcal_core::TargetOptions;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Code generation settings.
    #[serde(default)]
    target: TargetOptions,
}

impl AppConfig {
    pub fn new(target: TargetOptions) -> Self {
        Self { target }
    }

    /// Returns the code generation settings.
    pub fn target(&self) -> &TargetOptions {
        &self.target
    }

    /// Check that the settings can produce valid C++.
    ///
    /// # Errors
    ///
    /// Returns a message when the runtime header name is empty or cannot be
    /// placed inside an `#include "..."` line.
    pub fn validate(&self) -> Result<(), String> {
        let header = self.target.runtime_header();
        if header.trim().is_empty() {
            return Err("target.runtime_header must not be empty".to_string());
        }
        if header.contains(['"', '\n', '\r']) {
            return Err(format!(
                "target.runtime_header `{}` cannot contain quotes or line breaks",
                header.escape_debug()
            ));
        }
        Ok(())
    }
}
