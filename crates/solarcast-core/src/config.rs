// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Prediction client configuration
//!
//! The configuration is resolved once at start-up. Later sources win:
//! built-in defaults, an optional TOML file, the `SOLARCAST_API_URL`
//! environment variable and finally an explicit override (CLI flag).

use crate::errors::{PredictError, PredictResult};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable overriding the prediction service base URL
pub const API_URL_ENV: &str = "SOLARCAST_API_URL";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Path of the prediction endpoint, relative to the base URL
pub const PREDICT_PATH: &str = "/api/predict";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the prediction service (scheme, host, port)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional per-request timeout; requests wait indefinitely when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Defaults with the environment override applied
    pub fn from_env() -> PredictResult<Self> {
        Self::resolve(None, None)
    }

    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> PredictResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            PredictError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        debug!("Loaded client configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the effective configuration from every source
    pub fn resolve(file: Option<&Path>, base_url_override: Option<String>) -> PredictResult<Self> {
        Self::resolve_with(file, std::env::var(API_URL_ENV).ok(), base_url_override)
    }

    /// Same as [`ClientConfig::resolve`] with the environment value passed in
    pub fn resolve_with(
        file: Option<&Path>,
        env_base_url: Option<String>,
        base_url_override: Option<String>,
    ) -> PredictResult<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(url) = env_base_url.filter(|u| !u.trim().is_empty()) {
            debug!("Using base URL from {API_URL_ENV}");
            config.base_url = url;
        }
        if let Some(url) = base_url_override {
            config.base_url = url;
        }

        config.base_url = config.base_url.trim().trim_end_matches('/').to_string();
        config.validate()?;

        info!("Prediction service: {}", config.base_url);
        Ok(config)
    }

    pub fn validate(&self) -> PredictResult<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            PredictError::Config(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PredictError::Config(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(PredictError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Full URL of the prediction endpoint
    pub fn predict_url(&self) -> String {
        format!("{}{PREDICT_PATH}", self.base_url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn to_toml(&self) -> PredictResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PredictError::Config(format!("Failed to serialize config: {e}")))
    }
}
