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

use crate::config::ClientConfig;
use crate::errors::{PredictError, PredictResult};
use crate::types::{PredictionResult, RadiationReading};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Anything able to turn a radiation reading into a power prediction
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, radiation: RadiationReading) -> PredictResult<PredictionResult>;
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    radiation: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(rename = "powerOutput")]
    power_output: f64,
}

/// REST client for the prediction endpoint
///
/// One request per call: no retries, and no timeout unless configured.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    predict_url: String,
    client: Client,
}

impl PredictionClient {
    pub fn new(config: &ClientConfig) -> PredictResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PredictError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            predict_url: config.predict_url(),
            client,
        })
    }

    /// Client for a bare base URL with default settings
    pub fn for_base_url(base_url: impl Into<String>) -> PredictResult<Self> {
        let config = ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        };
        Self::new(&config)
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, radiation: RadiationReading) -> PredictResult<PredictionResult> {
        let body = PredictRequest {
            radiation: radiation.watts_per_m2(),
        };
        debug!("🔆 [PREDICT] Radiation: {}", body.radiation);
        debug!("   URL: {}", self.predict_url);

        // `json()` also sets `Content-Type: application/json`
        let response = self.client.post(&self.predict_url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("❌ [PREDICT] Status {}: {}", status, error_text);
            return Err(PredictError::HttpStatus {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: PredictResponse = serde_json::from_slice(&bytes).map_err(|e| {
            error!("❌ [PREDICT] Unexpected response body: {e}");
            PredictError::MalformedResponse(e.to_string())
        })?;

        info!("⚡ [PREDICT] Predicted power output: {}", parsed.power_output);
        Ok(PredictionResult::new(parsed.power_output))
    }
}
