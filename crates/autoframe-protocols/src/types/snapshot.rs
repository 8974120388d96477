//! Serializable node snapshots produced by the extractor.
//!
//! Attributes that may be mixed on the host are `Option<Option<T>>` here: the
//! outer option says whether the node has the attribute at all, the inner one
//! is `None` where the host reported a mixed value, which serializes as `null`.

use serde::Serialize;

use super::{Color, FontName, NodeType, Paint};

/// A paint reduced to the fields relevant for its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintSnapshot {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
}

impl PaintSnapshot {
    /// SOLID keeps its color, IMAGE its scale mode and hash; any other kind
    /// keeps only its type.
    pub fn from_paint(paint: &Paint) -> Self {
        let mut snapshot = PaintSnapshot {
            kind: paint.kind.clone(),
            visible: None,
            opacity: None,
            blend_mode: None,
            color: None,
            scale_mode: None,
            image_hash: None,
        };

        match paint.kind.as_str() {
            Paint::SOLID => {
                snapshot.visible = paint.visible;
                snapshot.opacity = paint.opacity;
                snapshot.blend_mode = paint.blend_mode.clone();
                snapshot.color = paint.color;
            }
            Paint::IMAGE => {
                snapshot.visible = paint.visible;
                snapshot.opacity = paint.opacity;
                snapshot.blend_mode = paint.blend_mode.clone();
                snapshot.scale_mode = paint.scale_mode.clone();
                snapshot.image_hash = paint.image_hash.clone();
            }
            _ => {}
        }

        snapshot
    }
}

/// Reference to image bytes that can be fetched from the host later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFill {
    pub image_hash: String,
}

/// Type-specific, sanitized node attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align_vertical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<Option<FontName>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<PaintSnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_smoothing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fills: Option<Option<Vec<PaintSnapshot>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_fills: Option<Vec<ImageFill>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<serde_json::Value>>,
}

impl NodeProperties {
    pub fn image_hashes(&self) -> impl Iterator<Item = &str> {
        self.image_fills
            .iter()
            .flatten()
            .map(|fill| fill.image_hash.as_str())
    }
}

/// Recursive snapshot of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub properties: NodeProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSnapshot>>,
}

impl NodeSnapshot {
    /// Depth-first visit of this snapshot and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NodeSnapshot)) {
        visit(self);
        for child in self.children.iter().flatten() {
            child.walk(visit);
        }
    }
}
