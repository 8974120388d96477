//! Host document errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Failed to load font {family} {style}: {message}")]
    FontLoad {
        family: String,
        style: String,
        message: String,
    },

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Operation '{operation}' is not supported on {node_type} nodes")]
    Unsupported { operation: String, node_type: String },

    #[error("Host operation failed: {0}")]
    Operation(String),
}

impl HostError {
    pub fn unsupported(operation: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
            node_type: node_type.into(),
        }
    }
}
