use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use super::{ModelError, Predictor};
use crate::models::feature_record::FeatureRecord;

#[derive(Debug, Deserialize)]
struct PricePredictionResponse {
    price: f64,
}

/// Delegates predictions to an HTTP service exposing `POST /predict`.
///
/// The record is sent as a JSON object whose keys follow the feature column
/// order. Calls block, so async callers run them on the blocking pool, and
/// the predictor must be created and dropped outside async code.
#[derive(Debug, Clone)]
pub struct RemotePredictor {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemotePredictor {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(RemotePredictor {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

impl Predictor for RemotePredictor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let response = self
            .client
            .post(self.predict_url())
            .json(record)
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ModelError::Service {
                status: 404,
                body: "prediction endpoint not found".into(),
            });
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(ModelError::Service { status, body });
        }

        let parsed: PricePredictionResponse = response.json()?;
        Ok(parsed.price)
    }

    fn name(&self) -> &str {
        "prediction-service"
    }
}
