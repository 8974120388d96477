use super::*;

#[test]
fn test_prediction_error_api() {
    let err = PredictionError::Api {
        status: 502,
        body: "upstream model unavailable".to_string(),
    };
    assert!(err.to_string().contains("502"));
    assert!(err.to_string().contains("upstream model unavailable"));
}

#[test]
fn test_prediction_error_parse() {
    let err = PredictionError::Parse("missing width".to_string());
    assert!(err.to_string().contains("Malformed prediction"));
    assert!(err.to_string().contains("missing width"));
}

#[test]
fn test_prediction_error_network() {
    let err = PredictionError::Network("Connection refused".to_string());
    assert!(err.to_string().contains("Network error"));
}

#[test]
fn test_prediction_error_timeout() {
    let err = PredictionError::Timeout(30);
    assert!(err.to_string().contains("timed out"));
    assert!(err.to_string().contains("30"));
}
