//! Prediction service request and response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ElementKey, FrameDescriptor};
use crate::error::PredictionError;

/// Request body: the frame descriptor plus the requested target size.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[serde(flatten)]
    pub frame: FrameDescriptor,
    pub desired_width: f64,
    pub desired_height: f64,
    /// Base64 image bytes keyed by image hash, when enrichment is enabled.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, String>,
}

impl PredictionRequest {
    pub fn new(frame: FrameDescriptor, desired_width: f64, desired_height: f64) -> Self {
        Self {
            frame,
            desired_width,
            desired_height,
            images: BTreeMap::new(),
        }
    }
}

/// Predicted placement for one element, in original-frame coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedElement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

impl PredictedElement {
    pub fn font_size(&self) -> Option<f64> {
        self.properties
            .as_ref()
            .and_then(|p| p.get("fontSize"))
            .and_then(|v| v.as_f64())
    }
}

/// Target layout for a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(default)]
    pub frame_name: String,
    pub width: f64,
    pub height: f64,
    pub elements: BTreeMap<String, Option<PredictedElement>>,
}

impl PredictionResult {
    /// Parse a service response body, rejecting payloads without a usable
    /// size or without any element.
    pub fn from_json(body: &str) -> Result<Self, PredictionError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| PredictionError::Parse(format!("response is not JSON: {}", e)))?;

        for field in ["width", "height"] {
            match value.get(field).and_then(|v| v.as_f64()) {
                Some(n) if n > 0.0 => {}
                Some(n) => {
                    return Err(PredictionError::Parse(format!(
                        "frame {} must be positive, got {}",
                        field, n
                    )))
                }
                None => {
                    return Err(PredictionError::Parse(format!(
                        "missing numeric frame {}",
                        field
                    )))
                }
            }
        }

        let has_elements = value
            .get("elements")
            .and_then(|v| v.as_object())
            .is_some_and(|map| !map.is_empty());
        if !has_elements {
            return Err(PredictionError::Parse(
                "response contains no elements".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| PredictionError::Parse(e.to_string()))
    }

    pub fn element(&self, key: ElementKey) -> Option<&PredictedElement> {
        self.elements.get(key.as_str()).and_then(|e| e.as_ref())
    }
}

#[cfg(test)]
#[path = "prediction_tests.rs"]
mod tests;
