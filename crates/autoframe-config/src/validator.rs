//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_predictor(config, &mut result);
        Self::validate_classifier(config, &mut result);
        Self::validate_layout(config, &mut result);

        result
    }

    fn validate_predictor(config: &Config, result: &mut ValidationResult) {
        match url::Url::parse(&config.predictor.endpoint) {
            Ok(url) if url.scheme() == "https" => {}
            Ok(url) if url.scheme() == "http" => {
                result.add_warning(ValidationWarning::new(
                    "predictor.endpoint",
                    "endpoint uses plain http, frame data is sent unencrypted",
                ));
            }
            Ok(url) => {
                result.add_error(ValidationError::new(
                    "predictor.endpoint",
                    format!("unsupported scheme '{}', expected http or https", url.scheme()),
                ));
            }
            Err(e) => {
                result.add_error(ValidationError::new(
                    "predictor.endpoint",
                    format!("invalid URL: {}", e),
                ));
            }
        }

        if config.predictor.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "predictor.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_classifier(config: &Config, result: &mut ValidationResult) {
        if config.classifier.small_font_threshold <= 0.0 {
            result.add_error(ValidationError::new(
                "classifier.small_font_threshold",
                "small_font_threshold must be positive",
            ));
        }

        let ratio = config.classifier.logo_area_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            result.add_error(ValidationError::new(
                "classifier.logo_area_ratio",
                "logo_area_ratio must be in (0, 1]",
            ));
        }
    }

    fn validate_layout(config: &Config, result: &mut ValidationResult) {
        let layout = &config.layout;

        if layout.overlap_padding < 0.0 {
            result.add_error(ValidationError::new(
                "layout.overlap_padding",
                "overlap_padding cannot be negative",
            ));
        }

        if layout.min_font_size <= 0.0 {
            result.add_error(ValidationError::new(
                "layout.min_font_size",
                "min_font_size must be positive",
            ));
        } else if layout.min_font_size < 6.0 {
            result.add_warning(ValidationWarning::new(
                "layout.min_font_size",
                "min_font_size below 6 allows text that is hard to read",
            ));
        }

        if !(layout.min_scale > 0.0 && layout.min_scale <= 1.0) {
            result.add_error(ValidationError::new(
                "layout.min_scale",
                "min_scale must be in (0, 1]",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
