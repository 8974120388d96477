use super::*;
use autoframe_protocols::{NodeStyle, Paint, Transform};

fn node(node_type: NodeType, width: f64, height: f64) -> SceneNode {
    SceneNode {
        id: "1:1".to_string(),
        name: "Layer".to_string(),
        node_type,
        x: 0.0,
        y: 0.0,
        width,
        height,
        absolute_transform: Transform::default(),
        children: None,
        style: NodeStyle::default(),
        text: None,
    }
}

fn text_node(font_size: Option<Mixed<f64>>) -> SceneNode {
    let mut n = node(NodeType::Text, 100.0, 20.0);
    n.text = Some(TextProps {
        characters: "Hello".to_string(),
        font_size,
        ..Default::default()
    });
    n
}

const FRAME_AREA: f64 = 400.0 * 300.0;

#[test]
fn test_counters_start_offsets() {
    let mut counters = NameCounters::new();
    assert_eq!(counters.next_name(Classification::Logo), "logo1");
    assert_eq!(counters.next_name(Classification::MainImage), "main_image3");
    assert_eq!(counters.next_name(Classification::Text), "text1");
    assert_eq!(counters.next_name(Classification::Disclaimer), "disclaimer1");
    assert_eq!(counters.next_name(Classification::Text), "text2");
    assert_eq!(counters.next_name(Classification::MainImage), "main_image4");
}

#[test]
fn test_large_text_is_text() {
    let config = ClassifierConfig::default();
    let n = text_node(Some(Mixed::Uniform(24.0)));
    assert_eq!(classify(&n, FRAME_AREA, &config), Some(Classification::Text));
}

#[test]
fn test_small_text_is_disclaimer() {
    let config = ClassifierConfig::default();
    let n = text_node(Some(Mixed::Uniform(8.0)));
    assert_eq!(
        classify(&n, FRAME_AREA, &config),
        Some(Classification::Disclaimer)
    );
}

#[test]
fn test_threshold_font_size_is_text() {
    let config = ClassifierConfig::default();
    let n = text_node(Some(Mixed::Uniform(12.0)));
    assert_eq!(classify(&n, FRAME_AREA, &config), Some(Classification::Text));
}

#[test]
fn test_mixed_font_size_is_text() {
    let config = ClassifierConfig::default();
    let n = text_node(Some(Mixed::Mixed));
    assert_eq!(classify(&n, FRAME_AREA, &config), Some(Classification::Text));
}

#[test]
fn test_missing_or_zero_font_size_defaults_above_threshold() {
    let config = ClassifierConfig::default();
    let missing = text_node(None);
    let zero = text_node(Some(Mixed::Uniform(0.0)));
    assert_eq!(
        effective_font_size(missing.text.as_ref().unwrap(), &config),
        Some(13.0)
    );
    assert_eq!(classify(&zero, FRAME_AREA, &config), Some(Classification::Text));
}

#[test]
fn test_large_shape_is_main_image() {
    let config = ClassifierConfig::default();
    let n = node(NodeType::Rectangle, 400.0, 200.0);
    assert_eq!(
        classify(&n, FRAME_AREA, &config),
        Some(Classification::MainImage)
    );
}

#[test]
fn test_small_shape_is_logo() {
    let config = ClassifierConfig::default();
    let n = node(NodeType::Vector, 40.0, 30.0);
    assert_eq!(classify(&n, FRAME_AREA, &config), Some(Classification::Logo));
}

#[test]
fn test_logo_threshold_is_exclusive() {
    let config = ClassifierConfig::default();
    // 0.15 * 120000 = 18000
    let at = node(NodeType::Ellipse, 180.0, 100.0);
    let below = node(NodeType::Ellipse, 179.0, 100.0);
    assert_eq!(
        classify(&at, FRAME_AREA, &config),
        Some(Classification::MainImage)
    );
    assert_eq!(classify(&below, FRAME_AREA, &config), Some(Classification::Logo));
}

#[test]
fn test_fills_do_not_affect_shape_rule() {
    let config = ClassifierConfig::default();
    let mut small = node(NodeType::Rectangle, 10.0, 10.0);
    small.style.fills = Some(Mixed::Uniform(vec![Paint::image("abc123")]));
    let mut large = node(NodeType::Ellipse, 400.0, 200.0);
    large.style.fills = Some(Mixed::Mixed);

    assert_eq!(classify(&small, FRAME_AREA, &config), Some(Classification::Logo));
    assert_eq!(
        classify(&large, FRAME_AREA, &config),
        Some(Classification::MainImage)
    );
}

#[test]
fn test_containers_follow_shape_rule() {
    let config = ClassifierConfig::default();
    for node_type in [
        NodeType::Group,
        NodeType::Component,
        NodeType::Instance,
        NodeType::ComponentSet,
    ] {
        assert_eq!(
            classify(&node(node_type, 10.0, 10.0), FRAME_AREA, &config),
            Some(Classification::Logo)
        );
        assert_eq!(
            classify(&node(node_type, 300.0, 300.0), FRAME_AREA, &config),
            Some(Classification::MainImage)
        );
    }
}

#[test]
fn test_frames_and_lines_are_unclassified() {
    let config = ClassifierConfig::default();
    assert_eq!(classify(&node(NodeType::Frame, 1.0, 1.0), FRAME_AREA, &config), None);
    assert_eq!(classify(&node(NodeType::Line, 1.0, 0.0), FRAME_AREA, &config), None);
}

#[test]
fn test_zero_frame_area_is_main_image() {
    let config = ClassifierConfig::default();
    assert_eq!(
        classify(&node(NodeType::Star, 1.0, 1.0), 0.0, &config),
        Some(Classification::MainImage)
    );
}

#[test]
fn test_clean_element_name_aliases() {
    let aliases = [
        ("imageFrame", "imageGroup"),
        ("textFrame", "textGroup"),
        ("vectorImage", "vectorImage"),
        ("IMAGEFRAME", "imageGroup"),
        ("textframe", "textGroup"),
    ];
    for (alias, key) in aliases {
        for suffix in ["", "1", "2", "42", "007"] {
            let name = format!("{alias}{suffix}");
            assert_eq!(clean_element_name(&name), key, "{name}");
        }
    }
}

#[test]
fn test_clean_element_name_classified_names() {
    assert_eq!(clean_element_name("logo1"), "logo");
    assert_eq!(clean_element_name("Disclaimer12"), "disclaimer");
    assert_eq!(clean_element_name("main_image3"), "main_image");
}

#[test]
fn test_clean_element_name_substrings() {
    assert_eq!(clean_element_name("text1"), "text");
    assert_eq!(clean_element_name("textGroup2"), "textGroup");
    assert_eq!(clean_element_name("Promo saleText"), "saleText");
    assert_eq!(clean_element_name("salesBadge"), "salesBadge");
    assert_eq!(clean_element_name("age_restriction"), "age_restriction");
    assert_eq!(clean_element_name("Frame 7"), "frame");
    assert_eq!(clean_element_name("hero vectorImage"), "vectorImage");
}

#[test]
fn test_clean_element_name_order_prefers_earlier_keys() {
    assert_eq!(clean_element_name("disclaimer text"), "disclaimer");
    assert_eq!(clean_element_name("logo frame"), "logo");
}

#[test]
fn test_clean_element_name_unmatched_is_lowercased() {
    assert_eq!(clean_element_name("Background42"), "background");
    assert_eq!(clean_element_name("123"), "");
}

#[test]
fn test_clean_element_name_idempotent_on_canonical_keys() {
    for key in CANONICAL_KEYS {
        assert_eq!(clean_element_name(key), key);
    }
}

#[test]
fn test_matches_name_prefix() {
    assert!(matches_name_prefix("text1", "text"));
    assert!(matches_name_prefix("Logo_white", "logo"));
    assert!(matches_name_prefix("textGroup", "textgroup"));
    assert!(matches_name_prefix("main_image3", "main_image"));
    assert!(!matches_name_prefix("textGroup1", "text"));
    assert!(!matches_name_prefix("subtext", "text"));
}
