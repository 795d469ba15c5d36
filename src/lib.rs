pub mod bot;
pub mod config;
pub mod estimator;
pub mod logger;
pub mod models;
pub mod predictor;
pub mod supervisor;
pub mod web;

pub use estimator::{DisplayState, EstimateError, Estimator};
pub use models::session::FormSession;
