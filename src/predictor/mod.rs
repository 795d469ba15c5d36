pub mod forest;
pub mod remote;

use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use thiserror::Error;

use crate::{config::Config, models::feature_record::FeatureRecord};

pub use forest::ForestModel;
pub use remote::RemotePredictor;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Artifact(String),

    #[error("model evaluation failed: {0}")]
    Evaluation(String),

    #[error("prediction service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("prediction service responded with error {status}: {body}")]
    Service { status: u16, body: String },
}

/// A trained price model. Implementations are loaded once and shared read-only.
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError>;

    fn name(&self) -> &str;
}

/// Builds the predictor named by the config, or `None` when it cannot be loaded.
///
/// A local artifact wins over a prediction service when both are configured.
/// Blocks, so call it from synchronous code or the blocking pool.
pub fn load(config: &Config) -> Option<Arc<dyn Predictor>> {
    if let Some(model_path) = &config.model_path {
        return match ForestModel::from_file(model_path) {
            Ok(model) => {
                info!(
                    "Loaded model {} with {} trees",
                    model_path,
                    model.tree_count()
                );
                Some(Arc::new(model))
            }
            Err(err) => {
                error!("Could not load model from {}: {}", model_path, err);
                None
            }
        };
    }

    if let Some(url) = &config.ml_service_url {
        let timeout = Duration::from_secs(config.prediction_timeout_seconds);
        return match RemotePredictor::new(url, timeout) {
            Ok(remote) => {
                info!("Using prediction service at {}", url);
                Some(Arc::new(remote))
            }
            Err(err) => {
                error!("Could not set up prediction service client: {}", err);
                None
            }
        };
    }

    warn!("No model_path or ml_service_url configured, estimates are unavailable");
    None
}
