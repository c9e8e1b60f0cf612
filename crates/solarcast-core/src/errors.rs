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

use thiserror::Error;

/// Message shown to the user for every failed prediction, whatever the cause
pub const FAILURE_MESSAGE: &str = "Unable to predict at the moment";

/// Prediction workflow error types
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Invalid radiation value: {0}")]
    Parse(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Prediction service returned error status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid response from prediction service: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`PredictError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseError,
    /// Network failure or a non-2xx status
    TransportError,
    MalformedResponseError,
    ConfigError,
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::ParseError,
            Self::Transport(_) | Self::HttpStatus { .. } => ErrorKind::TransportError,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponseError,
            Self::Config(_) => ErrorKind::ConfigError,
        }
    }
}

pub type PredictResult<T> = Result<T, PredictError>;

/// Illegal request state transition
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a prediction request is already in flight")]
    AlreadyPending,

    #[error("no prediction request is in flight")]
    NotPending,
}

/// Reasons a submission never reached the prediction service
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Rejected while an earlier request is still pending; nothing changed
    #[error("a prediction request is already in flight")]
    InFlight,

    /// Input did not parse; the request state is now `Failed`
    #[error(transparent)]
    InvalidInput(PredictError),

    /// The workflow refused to settle the request it just started
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_status_errors_with_transport() {
        let err = PredictError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::TransportError);
        assert_eq!(
            PredictError::MalformedResponse("x".to_string()).kind(),
            ErrorKind::MalformedResponseError
        );
        assert_eq!(
            PredictError::Parse("abc".to_string()).kind(),
            ErrorKind::ParseError
        );
    }

    #[test]
    fn test_error_messages() {
        let err = PredictError::HttpStatus {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Prediction service returned error status 500: boom"
        );

        let submit = SubmitError::InvalidInput(PredictError::Parse("abc".to_string()));
        assert_eq!(submit.to_string(), "Invalid radiation value: abc");
    }

    #[test]
    fn test_transition_errors_keep_their_own_message() {
        let submit = SubmitError::from(TransitionError::NotPending);
        assert!(matches!(
            submit,
            SubmitError::Transition(TransitionError::NotPending)
        ));
        assert_eq!(submit.to_string(), "no prediction request is in flight");
        assert_ne!(submit.to_string(), SubmitError::InFlight.to_string());
    }
}
