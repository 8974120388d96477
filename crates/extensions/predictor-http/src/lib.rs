//! HTTP layout predictor for AutoFrame.
//!
//! Posts a frame descriptor plus the desired size to the prediction service
//! and parses the predicted layout. One request per frame, no retries.

mod predictor;

pub use predictor::HttpPredictor;
