//! Memory host errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving a document.
#[derive(Debug, Error)]
pub enum MemoryHostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Image '{hash}' is not valid base64: {message}")]
    InvalidImage { hash: String, message: String },

    #[error("Selected node does not exist: {0}")]
    UnknownSelection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_display() {
        let err = MemoryHostError::DuplicateId("1:2".to_string());
        assert_eq!(err.to_string(), "Duplicate node id: 1:2");
    }

    #[test]
    fn test_invalid_image_display() {
        let err = MemoryHostError::InvalidImage {
            hash: "abc".to_string(),
            message: "bad padding".to_string(),
        };
        assert!(err.to_string().contains("'abc'"));
        assert!(err.to_string().contains("bad padding"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MemoryHostError = json_err.into();
        assert!(err.to_string().starts_with("Invalid document JSON"));
    }
}
