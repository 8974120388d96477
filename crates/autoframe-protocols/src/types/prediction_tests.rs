use super::*;
use crate::types::ElementSlots;
use serde_json::json;

#[test]
fn test_parse_valid_prediction() {
    let body = json!({
        "frameName": "F2",
        "width": 800,
        "height": 600,
        "elements": {
            "text": {"x": 20, "y": 20, "width": 200, "height": 40},
            "logo": {"x": 10, "y": 10, "width": 80, "height": 60},
            "disclaimer": null
        }
    })
    .to_string();

    let prediction = PredictionResult::from_json(&body).unwrap();
    assert_eq!(prediction.frame_name, "F2");
    assert_eq!(prediction.width, 800.0);
    assert_eq!(prediction.element(ElementKey::Text).unwrap().width, 200.0);
    assert_eq!(prediction.element(ElementKey::Logo).unwrap().x, 10.0);
    assert!(prediction.element(ElementKey::Disclaimer).is_none());
    assert!(prediction.element(ElementKey::SaleText).is_none());
}

#[test]
fn test_parse_rejects_non_json() {
    let err = PredictionResult::from_json("<html>502</html>").unwrap_err();
    assert!(matches!(err, PredictionError::Parse(_)));
}

#[test]
fn test_parse_rejects_missing_width() {
    let body = json!({"height": 600, "elements": {"logo": {"x": 0, "y": 0, "width": 1, "height": 1}}});
    let err = PredictionResult::from_json(&body.to_string()).unwrap_err();
    assert!(err.to_string().contains("width"));
}

#[test]
fn test_parse_rejects_zero_height() {
    let body = json!({"width": 800, "height": 0, "elements": {"logo": {"x": 0, "y": 0, "width": 1, "height": 1}}});
    let err = PredictionResult::from_json(&body.to_string()).unwrap_err();
    assert!(err.to_string().contains("height"));
}

#[test]
fn test_parse_rejects_empty_elements() {
    let body = json!({"width": 800, "height": 600, "elements": {}});
    let err = PredictionResult::from_json(&body.to_string()).unwrap_err();
    assert!(err.to_string().contains("no elements"));
}

#[test]
fn test_predicted_font_size() {
    let element: PredictedElement = serde_json::from_value(json!({
        "x": 0, "y": 0, "width": 10, "height": 10,
        "properties": {"fontSize": 18}
    }))
    .unwrap();
    assert_eq!(element.font_size(), Some(18.0));
}

#[test]
fn test_request_flattens_descriptor() {
    let frame = FrameDescriptor {
        frame_name: "Banner".to_string(),
        width: 400.0,
        height: 300.0,
        elements: ElementSlots::default(),
    };
    let request = PredictionRequest::new(frame, 800.0, 600.0);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["frameName"], "Banner");
    assert_eq!(json["desiredWidth"], 800.0);
    assert_eq!(json["desiredHeight"], 600.0);
    assert!(json["logo"].is_null());
    assert!(json.get("images").is_none());
}
