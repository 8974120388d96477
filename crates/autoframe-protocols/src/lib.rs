//! # AutoFrame Protocols
//!
//! Core data model and protocol definitions for the AutoFrame layout pipeline.
//! Contains only types and interface definitions - no pipeline logic.
//!
//! ## Core Traits
//!
//! - [`DesignHost`] - The document environment that owns the node tree
//! - [`LayoutPredictor`] - The remote layout-prediction service

pub mod error;
pub mod host;
pub mod predictor;
pub mod types;

pub use error::{FrameError, HostError, LayoutError, PredictionError, SelectionError};
pub use host::DesignHost;
pub use predictor::LayoutPredictor;
pub use types::*;
