//! Layout application errors.

use thiserror::Error;

use super::HostError;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Element '{key}' not found in frame '{frame}'")]
    ElementNotFound { key: String, frame: String },

    #[error(transparent)]
    Host(#[from] HostError),
}
