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

use crate::errors::{PredictError, PredictResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Solar irradiance submitted by the user (W/m²)
///
/// Any finite value is accepted, including negative ones; the prediction
/// service decides what it makes of them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RadiationReading(f64);

impl RadiationReading {
    /// Parse raw form input
    pub fn parse(raw: &str) -> PredictResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PredictError::Parse("radiation value is required".to_string()));
        }

        let value = trimmed
            .parse::<f64>()
            .map_err(|_| PredictError::Parse(format!("'{trimmed}' is not a number")))?;

        Self::new(value)
    }

    pub fn new(watts_per_m2: f64) -> PredictResult<Self> {
        if watts_per_m2.is_finite() {
            Ok(Self(watts_per_m2))
        } else {
            Err(PredictError::Parse(format!(
                "'{watts_per_m2}' is not a finite number"
            )))
        }
    }

    pub fn watts_per_m2(self) -> f64 {
        self.0
    }

    pub fn band(self) -> RadiationBand {
        RadiationBand::classify(self.0)
    }
}

impl FromStr for RadiationReading {
    type Err = PredictError;

    fn from_str(s: &str) -> PredictResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<f64> for RadiationReading {
    type Error = PredictError;

    fn try_from(value: f64) -> PredictResult<Self> {
        Self::new(value)
    }
}

impl From<RadiationReading> for f64 {
    fn from(reading: RadiationReading) -> Self {
        reading.0
    }
}

impl fmt::Display for RadiationReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} W/m²", self.0)
    }
}

/// Predicted power output (kW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionResult(f64);

impl PredictionResult {
    pub fn new(kilowatts: f64) -> Self {
        Self(kilowatts)
    }

    pub fn kilowatts(self) -> f64 {
        self.0
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kW", format_power(self.0))
    }
}

/// Format a power value the way it is displayed to the user (two decimals)
pub fn format_power(kilowatts: f64) -> String {
    format!("{kilowatts:.2}")
}

/// One successful submission, kept for charting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub radiation: RadiationReading,
    pub power_output: PredictionResult,
}

impl HistoryEntry {
    pub fn new(radiation: RadiationReading, power_output: PredictionResult) -> Self {
        Self {
            radiation,
            power_output,
        }
    }

    /// Chart point: x = radiation, y = power output
    pub fn point(&self) -> (f64, f64) {
        (self.radiation.watts_per_m2(), self.power_output.kilowatts())
    }
}

/// Coarse irradiance level, used to tint results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiationBand {
    /// Below 500 W/m²
    Low,
    /// 500 up to 1000 W/m²
    Moderate,
    /// 1000 W/m² and above
    High,
}

impl RadiationBand {
    pub const MODERATE_THRESHOLD: f64 = 500.0;
    pub const HIGH_THRESHOLD: f64 = 1000.0;

    pub fn classify(watts_per_m2: f64) -> Self {
        if watts_per_m2 < Self::MODERATE_THRESHOLD {
            Self::Low
        } else if watts_per_m2 < Self::HIGH_THRESHOLD {
            Self::Moderate
        } else {
            Self::High
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RadiationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
