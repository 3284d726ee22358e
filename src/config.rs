//! Configuration types for the kiosk.
//!
//! Settings load from `kiosk.toml` (under the kiosk home directory) with
//! serde defaults, so a missing file means a fully default configuration.
//! `validate()` reports non-fatal warnings; only genuinely unusable values
//! are errors.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants;
use crate::export::CsvSchema;
use crate::paths::get_config_path;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// kiosk.toml configuration structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub export: ExportConfig,
    pub sheet: SheetConfig,
    pub videos: VideosConfig,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Serve from an in-memory store instead of the redb file.
    pub memory: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: constants::DEFAULT_PORT,
            memory: false,
        }
    }
}

/// CSV export settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub schema: CsvSchema,
}

/// Remote spreadsheet endpoint the client flow posts to.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub endpoint: Option<String>,
}

/// Video catalog source: a local path or an http(s) URL.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VideosConfig {
    pub source: Option<String>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration, collecting non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error for values the kiosk cannot run with:
    /// - port 0
    /// - a sheet endpoint that is not an http(s) URL
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port cannot be 0. Use a valid port number (1-65535)".to_string());
        }

        if self.server.port < 1024 && self.server.port > 0 {
            warnings.push(format!(
                "server.port {} is a system/privileged port (< 1024); ports >= 1024 avoid permission issues",
                self.server.port
            ));
        }

        if let Some(endpoint) = &self.sheet.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                errors.push(format!(
                    "sheet.endpoint must be an http(s) URL (got: '{endpoint}')"
                ));
            }
        } else {
            warnings.push(
                "sheet.endpoint not set; client submissions will always use the local fallback"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(ValidationResult { warnings })
        } else {
            anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "))
        }
    }
}
