//! Prediction service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Prediction API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Malformed prediction: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Prediction timed out after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
#[path = "prediction_tests.rs"]
mod tests;
