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

//! Request lifecycle state machine

use crate::errors::TransitionError;
use crate::types::{PredictionResult, format_power};
use serde::Serialize;
use std::fmt;

/// Lifecycle stage of the current or most recent prediction request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(PredictionResult),
    /// Carries the user-facing message
    Failed(String),
}

/// Discrete events driving [`RequestState`]
#[derive(Debug, Clone, PartialEq)]
pub enum RequestEvent {
    Submitted,
    Resolved(PredictionResult),
    Rejected(String),
}

impl RequestState {
    /// Pure transition function; `self` is left untouched
    pub fn transition(&self, event: RequestEvent) -> Result<Self, TransitionError> {
        match (self, event) {
            (Self::Pending, RequestEvent::Submitted) => Err(TransitionError::AlreadyPending),
            (_, RequestEvent::Submitted) => Ok(Self::Pending),
            (Self::Pending, RequestEvent::Resolved(result)) => Ok(Self::Succeeded(result)),
            (Self::Pending, RequestEvent::Rejected(message)) => Ok(Self::Failed(message)),
            (_, RequestEvent::Resolved(_) | RequestEvent::Rejected(_)) => {
                Err(TransitionError::NotPending)
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether a new submission may start (the submit button is enabled)
    pub fn accepts_submission(&self) -> bool {
        !self.is_pending()
    }

    pub fn result(&self) -> Option<PredictionResult> {
        match self {
            Self::Succeeded(result) => Some(*result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Displayed prediction, two decimals; only present after a success
    pub fn display_value(&self) -> Option<String> {
        self.result().map(|r| format_power(r.kilowatts()))
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "predicting..."),
            Self::Succeeded(result) => write!(f, "{result}"),
            Self::Failed(message) => write!(f, "{message}"),
        }
    }
}
