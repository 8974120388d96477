//! Layout predictor trait definition.

use async_trait::async_trait;

use crate::error::PredictionError;
use crate::types::{PredictionRequest, PredictionResult};

/// A service that predicts a target layout for a frame.
#[async_trait]
pub trait LayoutPredictor: Send + Sync {
    /// Returns the predictor ID.
    fn id(&self) -> &str;

    /// Single attempt, no retries.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError>;
}
