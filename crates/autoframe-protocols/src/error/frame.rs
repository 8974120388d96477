//! Per-frame pipeline errors.

use thiserror::Error;

use super::{HostError, LayoutError, PredictionError};

/// Any failure that aborts processing of a single frame.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
