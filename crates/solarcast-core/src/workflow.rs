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

//! Prediction request workflow
//!
//! [`PredictionWorkflow`] holds the request state and the session history
//! and knows nothing about HTTP: a host calls [`PredictionWorkflow::submit`],
//! performs the call however it likes, then hands the outcome to
//! [`PredictionWorkflow::resolve`]. [`PredictionSession`] does both steps
//! with a [`PredictionService`].

use crate::client::PredictionService;
use crate::errors::{FAILURE_MESSAGE, PredictResult, SubmitError, TransitionError};
use crate::history::SessionHistory;
use crate::state::{RequestEvent, RequestState};
use crate::types::{HistoryEntry, PredictionResult, RadiationReading};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct PredictionWorkflow {
    state: RequestState,
    in_flight: Option<RadiationReading>,
    history: SessionHistory,
}

impl PredictionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Reading of the request currently awaiting a response
    pub fn in_flight(&self) -> Option<RadiationReading> {
        self.in_flight
    }

    /// Start a submission from raw user input
    ///
    /// On success the state is `Pending` (any previous result is cleared) and
    /// the returned reading must be sent to the prediction service. Invalid
    /// input leaves the state `Failed`. While a request is pending nothing
    /// changes and `SubmitError::InFlight` is returned.
    pub fn submit(&mut self, raw: &str) -> Result<RadiationReading, SubmitError> {
        let pending = self
            .state
            .transition(RequestEvent::Submitted)
            .map_err(|_| SubmitError::InFlight)?;

        match RadiationReading::parse(raw) {
            Ok(reading) => {
                debug!("Submitting radiation reading: {}", reading);
                self.state = pending;
                self.in_flight = Some(reading);
                Ok(reading)
            }
            Err(e) => {
                warn!("Rejected input {:?}: {}", raw, e);
                self.state = RequestState::Failed(FAILURE_MESSAGE.to_string());
                Err(SubmitError::InvalidInput(e))
            }
        }
    }

    /// Settle the pending request with the service outcome
    ///
    /// Only a success appends to the history.
    pub fn resolve(
        &mut self,
        outcome: PredictResult<PredictionResult>,
    ) -> Result<&RequestState, TransitionError> {
        let reading = self.in_flight.ok_or(TransitionError::NotPending)?;

        let event = match &outcome {
            Ok(result) => RequestEvent::Resolved(*result),
            Err(e) => {
                warn!("Prediction for {} failed: {}", reading, e);
                RequestEvent::Rejected(FAILURE_MESSAGE.to_string())
            }
        };
        self.state = self.state.transition(event)?;
        self.in_flight = None;

        if let Ok(result) = outcome {
            info!("Prediction for {}: {}", reading, result);
            self.history.append(HistoryEntry::new(reading, result));
        }

        Ok(&self.state)
    }
}

/// A workflow bound to a prediction service
#[derive(Debug)]
pub struct PredictionSession<S> {
    workflow: PredictionWorkflow,
    service: S,
}

impl<S: PredictionService> PredictionSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            workflow: PredictionWorkflow::new(),
            service,
        }
    }

    pub fn state(&self) -> &RequestState {
        self.workflow.state()
    }

    pub fn history(&self) -> &SessionHistory {
        self.workflow.history()
    }

    pub fn workflow(&self) -> &PredictionWorkflow {
        &self.workflow
    }

    /// Validate, call the service once and settle the result
    ///
    /// Invalid input is not an error here: it ends in the `Failed` state like
    /// any other failure.
    pub async fn submit(&mut self, raw: &str) -> Result<&RequestState, SubmitError> {
        let reading = match self.workflow.submit(raw) {
            Ok(reading) => reading,
            Err(SubmitError::InvalidInput(_)) => return Ok(self.workflow.state()),
            Err(e) => return Err(e),
        };

        let outcome = self.service.predict(reading).await;
        Ok(self.workflow.resolve(outcome)?)
    }
}
