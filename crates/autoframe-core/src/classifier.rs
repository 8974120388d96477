//! Node classification and name normalisation.
//!
//! Classification assigns a semantic role to a node and drives the renaming
//! done during export. Name cleaning maps an arbitrary node name back to a
//! canonical element key when layouts are applied.

use autoframe_config::ClassifierConfig;
use autoframe_protocols::{Mixed, NodeType, SceneNode, TextProps};

/// Semantic role assigned to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Classification {
    Logo,
    MainImage,
    Text,
    Disclaimer,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Logo => "logo",
            Classification::MainImage => "main_image",
            Classification::Text => "text",
            Classification::Disclaimer => "disclaimer",
        }
    }
}

/// Per-frame counters producing `<classification><n>` names.
///
/// The image counter starts at 2 so the first main image is `main_image3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCounters {
    logo: u32,
    main_image: u32,
    text: u32,
    disclaimer: u32,
}

impl NameCounters {
    pub fn new() -> Self {
        Self {
            logo: 0,
            main_image: 2,
            text: 0,
            disclaimer: 0,
        }
    }

    /// Increment the counter for `kind` and return the new name.
    pub fn next_name(&mut self, kind: Classification) -> String {
        let counter = match kind {
            Classification::Logo => &mut self.logo,
            Classification::MainImage => &mut self.main_image,
            Classification::Text => &mut self.text,
            Classification::Disclaimer => &mut self.disclaimer,
        };
        *counter += 1;
        format!("{}{}", kind.as_str(), counter)
    }
}

impl Default for NameCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Font size used for classification and snapshots.
///
/// A missing or zero size is treated as just above the disclaimer threshold.
/// Returns `None` when the node mixes several sizes.
pub fn effective_font_size(text: &TextProps, config: &ClassifierConfig) -> Option<f64> {
    match &text.font_size {
        Some(Mixed::Mixed) => None,
        Some(Mixed::Uniform(size)) if *size > 0.0 => Some(*size),
        _ => Some(config.small_font_threshold + 1.0),
    }
}

/// Classify a node relative to the area of its top-level frame.
///
/// Rules, first match wins:
/// - TEXT below the font threshold is a disclaimer, other TEXT is text
///   (mixed sizes count as text)
/// - a shape-like node smaller than the logo ratio of the frame is a logo,
///   any other shape-like node is the main image
pub fn classify(
    node: &SceneNode,
    frame_area: f64,
    config: &ClassifierConfig,
) -> Option<Classification> {
    if node.node_type == NodeType::Text {
        let small = node
            .text
            .as_ref()
            .and_then(|text| effective_font_size(text, config))
            .is_some_and(|size| size < config.small_font_threshold);
        return Some(if small {
            Classification::Disclaimer
        } else {
            Classification::Text
        });
    }

    if !node.node_type.is_shape_like() {
        return None;
    }

    if node.area() < frame_area * config.logo_area_ratio {
        Some(Classification::Logo)
    } else {
        Some(Classification::MainImage)
    }
}

/// Lower-cased names that map straight to a canonical key.
const NAME_ALIASES: [(&str, &str); 3] = [
    ("imageframe", "imageGroup"),
    ("textframe", "textGroup"),
    ("vectorimage", "vectorImage"),
];

/// Canonical keys checked by substring, in order.
const CANONICAL_KEYS: [&str; 11] = [
    "age_restriction",
    "disclaimer",
    "imageGroup",
    "logo",
    "saleGroup",
    "saleText",
    "salesBadge",
    "textGroup",
    "vectorImage",
    "text",
    "frame",
];

/// Map a node name to a canonical element key.
///
/// Trailing digits are stripped and the rest lower-cased. Known aliases
/// resolve directly; otherwise the first canonical key contained in the
/// name wins. Unmatched names come back lower-cased.
pub fn clean_element_name(name: &str) -> String {
    let lowered = name
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .to_lowercase();

    if let Some((_, canonical)) = NAME_ALIASES.iter().find(|(alias, _)| *alias == lowered) {
        return (*canonical).to_string();
    }

    CANONICAL_KEYS
        .iter()
        .find(|key| lowered.contains(&key.to_lowercase()))
        .map(|key| (*key).to_string())
        .unwrap_or(lowered)
}

/// Case-insensitive prefix match that respects word boundaries.
///
/// What follows the prefix must be empty or start with a non-letter, so
/// `text1` and `logo_white` match `text` and `logo` but `textGroup1` does
/// not match `text`.
pub fn matches_name_prefix(name: &str, prefix: &str) -> bool {
    let name = name.to_lowercase();
    let prefix = prefix.to_lowercase();
    match name.strip_prefix(&prefix) {
        Some(rest) => rest.chars().next().is_none_or(|c| !c.is_alphabetic()),
        None => false,
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
