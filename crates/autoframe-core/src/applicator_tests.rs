use super::*;
use std::collections::BTreeMap;

use autoframe_host_memory::{DocumentFile, MemoryHost, NodeSpec};
use autoframe_protocols::{FontName, LetterSpacing, LengthUnit, LineHeight, TextProps};

fn inter() -> FontName {
    FontName::new("Inter", "Regular")
}

fn frame_doc(available_fonts: Option<Vec<FontName>>) -> DocumentFile {
    let text = NodeSpec::new("t", "text1", NodeType::Text)
        .at(20.0, 20.0)
        .sized(100.0, 20.0)
        .with_text(TextProps {
            characters: "Big sale".to_string(),
            font_size: Some(Mixed::Uniform(24.0)),
            line_height: Some(Mixed::Uniform(LineHeight::Pixels { value: 30.0 })),
            letter_spacing: Some(Mixed::Uniform(LetterSpacing {
                value: 1.0,
                unit: LengthUnit::Pixels,
            })),
            fonts: vec![inter()],
            ..Default::default()
        });
    let logo = NodeSpec::new("l", "logo1", NodeType::Rectangle)
        .at(300.0, 200.0)
        .sized(40.0, 30.0);

    DocumentFile {
        name: "Doc".to_string(),
        available_fonts,
        nodes: vec![
            NodeSpec::new("f", "Banner", NodeType::Frame)
                .sized(800.0, 600.0)
                .with_children(vec![text, logo]),
        ],
        ..Default::default()
    }
}

fn element(x: f64, y: f64, width: f64, height: f64) -> Option<PredictedElement> {
    Some(PredictedElement {
        x,
        y,
        width,
        height,
        properties: None,
    })
}

fn prediction(elements: Vec<(&str, Option<PredictedElement>)>) -> PredictionResult {
    PredictionResult {
        frame_name: "Banner 800x600".to_string(),
        width: 800.0,
        height: 600.0,
        elements: elements
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    }
}

const ORIGINAL: Size = Size {
    width: 400.0,
    height: 300.0,
};
const TARGET: Size = Size {
    width: 800.0,
    height: 600.0,
};

#[tokio::test]
async fn test_apply_scales_text_and_logo() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let prediction = prediction(vec![
        ("text", element(20.0, 20.0, 200.0, 40.0)),
        ("logo", element(300.0, 200.0, 80.0, 60.0)),
    ]);
    let report = applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    assert_eq!(report.applied, vec![ElementKey::Logo, ElementKey::Text]);
    assert!(report.is_complete());

    let text = host.node("t").unwrap();
    assert_eq!((text.x, text.y), (40.0, 40.0));
    assert_eq!((text.width, text.height), (400.0, 80.0));

    let logo = host.node("l").unwrap();
    assert_eq!((logo.width, logo.height), (160.0, 120.0));
    assert_eq!((logo.x, logo.y), (600.0, 400.0));
    assert_eq!(report.overlaps_resolved, 0);
}

#[tokio::test]
async fn test_apply_scales_font_metrics() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let prediction = prediction(vec![("text", element(20.0, 20.0, 200.0, 40.0))]);
    applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    let text = host.node("t").unwrap().text.unwrap();
    assert_eq!(text.font_size, Some(Mixed::Uniform(48.0)));
    assert_eq!(
        text.line_height,
        Some(Mixed::Uniform(LineHeight::Pixels { value: 120.0 }))
    );
    assert_eq!(
        text.letter_spacing,
        Some(Mixed::Uniform(LetterSpacing {
            value: 4.0,
            unit: LengthUnit::Pixels
        }))
    );
    assert_eq!(text.text_auto_resize, Some(TextAutoResize::None));
    assert_eq!(host.loaded_fonts(), vec![inter()]);
}

#[tokio::test]
async fn test_predicted_font_size_wins_and_respects_minimum() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let mut text = element(0.0, 0.0, 100.0, 20.0).unwrap();
    text.properties = Some(serde_json::json!({"fontSize": 6}));
    let prediction = prediction(vec![("text", Some(text))]);

    // shrinking to half size: 6 * 0.5 = 3, floored to the minimum
    applicator
        .apply("f", &prediction, TARGET, ORIGINAL)
        .await
        .unwrap();

    let text = host.node("t").unwrap().text.unwrap();
    assert_eq!(text.font_size, Some(Mixed::Uniform(config.min_font_size)));
}

#[tokio::test]
async fn test_unavailable_font_keeps_metrics() {
    let host = MemoryHost::from_document(frame_doc(Some(vec![]))).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let prediction = prediction(vec![("text", element(20.0, 20.0, 200.0, 40.0))]);
    let report = applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    assert_eq!(report.applied, vec![ElementKey::Text]);
    let text = host.node("t").unwrap();
    assert_eq!((text.x, text.y), (40.0, 40.0));
    let props = text.text.unwrap();
    assert_eq!(props.font_size, Some(Mixed::Uniform(24.0)));
    assert_eq!(props.text_auto_resize, Some(TextAutoResize::None));
}

#[tokio::test]
async fn test_missing_element_is_skipped() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let prediction = prediction(vec![
        ("salesBadge", element(0.0, 0.0, 10.0, 10.0)),
        ("text", element(20.0, 20.0, 200.0, 40.0)),
        ("disclaimer", None),
    ]);
    let report = applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    assert_eq!(report.applied, vec![ElementKey::Text]);
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        &report.skipped[0],
        LayoutError::ElementNotFound { key, .. } if key == "salesBadge"
    ));
}

#[tokio::test]
async fn test_oversized_prediction_capped_to_frame() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let prediction = prediction(vec![("logo", element(350.0, 250.0, 1000.0, 1000.0))]);
    applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    let logo = host.node("l").unwrap();
    // 40x30 scaled into an 800x600 cap keeps the 4:3 ratio
    assert_eq!((logo.width, logo.height), (800.0, 600.0));
    assert_eq!((logo.x, logo.y), (0.0, 0.0));
}

#[tokio::test]
async fn test_overlap_pass_moves_later_sibling() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    // logo lands at (300, 20) 160x120 across the right edge of the text box
    let prediction = prediction(vec![
        ("text", element(20.0, 20.0, 200.0, 40.0)),
        ("logo", element(150.0, 10.0, 80.0, 60.0)),
    ]);
    let report = applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    assert_eq!(report.overlaps_resolved, 1);
    assert_eq!(report.boundary_limited, 0);
    assert_eq!(report.overlaps_remaining, 0);

    let text = Rect::of_node(&host.node("t").unwrap());
    let logo = Rect::of_node(&host.node("l").unwrap());
    assert_eq!((text.x, text.y), (40.0, 40.0));
    // overlap 140 x 80: pushed right by 140 + 10
    assert_eq!((logo.x, logo.y), (450.0, 20.0));
    assert!(!text.intersects(&logo));
}

#[tokio::test]
async fn test_single_overlap_pass_reports_remaining_overlap() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    // logo lands at (20, 20) 160x120, starting left of the text box
    let prediction = prediction(vec![
        ("text", element(20.0, 20.0, 200.0, 40.0)),
        ("logo", element(10.0, 10.0, 80.0, 60.0)),
    ]);
    let report = applicator
        .apply("f", &prediction, ORIGINAL, TARGET)
        .await
        .unwrap();

    let text = Rect::of_node(&host.node("t").unwrap());
    let logo = Rect::of_node(&host.node("l").unwrap());
    // overlap 140 x 80: pushed right from its own position by 140 + 10
    assert_eq!((logo.x, logo.y), (170.0, 20.0));
    assert_eq!(report.overlaps_resolved, 1);
    assert_eq!(report.boundary_limited, 0);
    assert_eq!(report.overlaps_remaining, 1);
    assert!(text.intersects(&logo));
}

#[tokio::test]
async fn test_apply_unknown_frame() {
    let host = MemoryHost::from_document(frame_doc(None)).unwrap();
    let config = LayoutConfig::default();
    let applicator = LayoutApplicator::new(&host, &config);

    let err = applicator
        .apply("missing", &prediction(vec![]), ORIGINAL, TARGET)
        .await
        .unwrap_err();
    assert!(matches!(err, LayoutError::Host(HostError::NodeNotFound(_))));
}
