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

//! SolarCast core - solar power prediction client
//!
//! Sends a solar radiation reading to a remote prediction service, tracks the
//! request lifecycle and keeps the session's successful predictions for
//! charting.

pub mod chart;
pub mod client;
pub mod config;
pub mod errors;
pub mod history;
pub mod state;
pub mod types;
pub mod workflow;

pub use chart::render_history_svg;
pub use client::{PredictionClient, PredictionService};
pub use config::{API_URL_ENV, ClientConfig, DEFAULT_BASE_URL, PREDICT_PATH};
pub use errors::{
    ErrorKind, FAILURE_MESSAGE, PredictError, PredictResult, SubmitError, TransitionError,
};
pub use history::SessionHistory;
pub use state::{RequestEvent, RequestState};
pub use types::{HistoryEntry, PredictionResult, RadiationBand, RadiationReading, format_power};
pub use workflow::{PredictionSession, PredictionWorkflow};
