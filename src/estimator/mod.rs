pub mod format;

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::{
    models::{
        coordinate::Coordinate, feature_record::FeatureRecord, prediction::PredictionResult,
        property::PropertyAttributes,
    },
    predictor::Predictor,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("no model is loaded")]
    ModelUnavailable,

    #[error("{0}")]
    PredictionFailure(String),
}

/// What the display surface shows after a calculate action.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Idle,
    Result {
        prediction: PredictionResult,
        coordinate: Coordinate,
        attributes: PropertyAttributes,
    },
    Error {
        message: String,
    },
    Unavailable,
}

/// Turns form input into a price using the predictor loaded at startup.
#[derive(Clone, Default)]
pub struct Estimator {
    predictor: Option<Arc<dyn Predictor>>,
}

impl Estimator {
    pub fn new(predictor: Option<Arc<dyn Predictor>>) -> Self {
        Estimator { predictor }
    }

    pub fn unavailable() -> Self {
        Estimator { predictor: None }
    }

    pub fn is_available(&self) -> bool {
        self.predictor.is_some()
    }

    /// Makes a single prediction attempt. Errors and panics inside the
    /// predictor come back as `PredictionFailure`.
    pub fn estimate(
        &self,
        coordinate: Coordinate,
        attributes: &PropertyAttributes,
    ) -> Result<PredictionResult, EstimateError> {
        let predictor = self
            .predictor
            .as_ref()
            .ok_or(EstimateError::ModelUnavailable)?;

        let record = FeatureRecord::assemble(coordinate, attributes);
        debug!("Predicting with {} for {:?}", predictor.name(), record);

        let price = panic::catch_unwind(AssertUnwindSafe(|| predictor.predict(&record)))
            .map_err(|_| EstimateError::PredictionFailure("the model panicked".into()))?
            .map_err(|err| EstimateError::PredictionFailure(err.to_string()))?;

        if !price.is_finite() || price < 0.0 {
            return Err(EstimateError::PredictionFailure(format!(
                "the model returned an invalid price: {price}"
            )));
        }

        Ok(PredictionResult::new(price, attributes.surface_m2))
    }

    pub fn calculate(
        &self,
        coordinate: Coordinate,
        attributes: &PropertyAttributes,
    ) -> DisplayState {
        match self.estimate(coordinate, attributes) {
            Ok(prediction) => DisplayState::Result {
                prediction,
                coordinate,
                attributes: *attributes,
            },
            Err(EstimateError::ModelUnavailable) => DisplayState::Unavailable,
            Err(EstimateError::PredictionFailure(message)) => {
                warn!("Prediction failed: {}", message);
                DisplayState::Error { message }
            }
        }
    }
}
