//! Errors raised before a pipeline run starts.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("Nothing is selected, select one or more frames")]
    Empty,

    #[error("The selection contains no frames")]
    NoFrames,

    #[error("Invalid desired size {width}x{height}: both dimensions must be positive")]
    InvalidSize { width: f64, height: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_empty() {
        let err = SelectionError::Empty;
        assert!(err.to_string().contains("Nothing is selected"));
    }

    #[test]
    fn test_selection_error_no_frames() {
        let err = SelectionError::NoFrames;
        assert!(err.to_string().contains("no frames"));
    }

    #[test]
    fn test_selection_error_invalid_size() {
        let err = SelectionError::InvalidSize { width: 0.0, height: -5.0 };
        let display = err.to_string();
        assert!(display.contains("0x-5"));
        assert!(display.contains("positive"));
    }
}
