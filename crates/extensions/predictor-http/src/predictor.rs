//! HTTP predictor implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use autoframe_config::PredictorConfig;
use autoframe_protocols::{LayoutPredictor, PredictionError, PredictionRequest, PredictionResult};

/// Layout predictor backed by a JSON-over-HTTP service.
pub struct HttpPredictor {
    endpoint: String,
    timeout_seconds: u64,
    client: reqwest::Client,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| PredictionError::Network(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            timeout_seconds,
            client,
        })
    }

    pub fn from_config(config: &PredictorConfig) -> Result<Self, PredictionError> {
        Self::new(config.endpoint.clone(), config.timeout_seconds)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: String) -> Result<String, PredictionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(PredictionError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    fn transport_error(&self, err: reqwest::Error) -> PredictionError {
        if err.is_timeout() {
            PredictionError::Timeout(self.timeout_seconds)
        } else {
            PredictionError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl LayoutPredictor for HttpPredictor {
    fn id(&self) -> &str {
        "http"
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        let body = serde_json::to_string(request)
            .map_err(|e| PredictionError::Parse(format!("cannot encode request: {e}")))?;

        info!(
            frame = %request.frame.frame_name,
            width = request.desired_width,
            height = request.desired_height,
            "Requesting layout prediction"
        );
        debug!(endpoint = %self.endpoint, body = %body, "Prediction request");

        let response = self.send_request(body).await?;
        debug!(body = %response, "Prediction response");

        PredictionResult::from_json(&response)
    }
}

#[cfg(test)]
#[path = "predictor_tests.rs"]
mod tests;
