//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub predictor: PredictorConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://easyai.kz/predict".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Classification thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Text below this font size is a disclaimer.
    #[serde(default = "default_small_font_threshold")]
    pub small_font_threshold: f64,

    /// Shapes covering less than this share of the frame are logos.
    #[serde(default = "default_logo_area_ratio")]
    pub logo_area_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            small_font_threshold: default_small_font_threshold(),
            logo_area_ratio: default_logo_area_ratio(),
        }
    }
}

fn default_small_font_threshold() -> f64 {
    12.0
}

fn default_logo_area_ratio() -> f64 {
    0.15
}

/// Layout application tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_overlap_padding")]
    pub overlap_padding: f64,

    #[serde(default = "default_min_font_size")]
    pub min_font_size: f64,

    #[serde(default = "default_min_scale")]
    pub min_scale: f64,

    /// Horizontal distance between a source frame and its predicted clone.
    #[serde(default = "default_clone_gap")]
    pub clone_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            overlap_padding: default_overlap_padding(),
            min_font_size: default_min_font_size(),
            min_scale: default_min_scale(),
            clone_gap: default_clone_gap(),
        }
    }
}

fn default_overlap_padding() -> f64 {
    10.0
}

fn default_min_font_size() -> f64 {
    10.0
}

fn default_min_scale() -> f64 {
    0.1
}

fn default_clone_gap() -> f64 {
    50.0
}

/// Export behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Embed base64 image bytes in exported JSON.
    #[serde(default = "default_true")]
    pub include_image_data: bool,

    /// Embed base64 image bytes in prediction requests.
    #[serde(default)]
    pub enrich_predictions: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_image_data: true,
            enrich_predictions: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_log_dir")]
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_log_dir(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".autoframe").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".autoframe/logs"))
}
