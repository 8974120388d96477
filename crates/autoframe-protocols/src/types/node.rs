//! Host node model: what the pipeline can read from a visual node.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{HostValue, Mixed};

/// Host-issued node identifier.
pub type NodeId = String;

/// Node type tag as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Page,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Vector,
    Line,
    Text,
    BooleanOperation,
    Slice,
    #[serde(other)]
    Other,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Document => "DOCUMENT",
            NodeType::Page => "PAGE",
            NodeType::Frame => "FRAME",
            NodeType::Group => "GROUP",
            NodeType::Section => "SECTION",
            NodeType::Component => "COMPONENT",
            NodeType::ComponentSet => "COMPONENT_SET",
            NodeType::Instance => "INSTANCE",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Polygon => "POLYGON",
            NodeType::Star => "STAR",
            NodeType::Vector => "VECTOR",
            NodeType::Line => "LINE",
            NodeType::Text => "TEXT",
            NodeType::BooleanOperation => "BOOLEAN_OPERATION",
            NodeType::Slice => "SLICE",
            NodeType::Other => "OTHER",
        }
    }

    /// Types the classifier treats as pictorial (logo or main image).
    pub fn is_shape_like(&self) -> bool {
        matches!(
            self,
            NodeType::Rectangle
                | NodeType::Ellipse
                | NodeType::Polygon
                | NodeType::Star
                | NodeType::Vector
                | NodeType::Group
                | NodeType::Component
                | NodeType::Instance
                | NodeType::ComponentSet
        )
    }

    /// Whether the host offers a resize primitive for this type.
    pub fn supports_resize(&self) -> bool {
        !matches!(
            self,
            NodeType::Document | NodeType::Page | NodeType::BooleanOperation | NodeType::Other
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 2x3 affine transform `[[a, c, tx], [b, d, ty]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform(pub [[f64; 3]; 2]);

impl Transform {
    pub fn translate(x: f64, y: f64) -> Self {
        Self([[1.0, 0.0, x], [0.0, 1.0, y]])
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.0[0][2], self.0[1][2])
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::translate(0.0, 0.0)
    }
}

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

/// A fill or stroke paint as the host reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
    /// Kind-specific attributes (gradient stops, transforms, filters, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Paint {
    pub const SOLID: &'static str = "SOLID";
    pub const IMAGE: &'static str = "IMAGE";

    pub fn solid(color: Color) -> Self {
        Self {
            kind: Self::SOLID.to_string(),
            visible: Some(true),
            opacity: Some(1.0),
            blend_mode: Some("NORMAL".to_string()),
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn image(image_hash: impl Into<String>) -> Self {
        Self {
            kind: Self::IMAGE.to_string(),
            visible: Some(true),
            opacity: Some(1.0),
            blend_mode: Some("NORMAL".to_string()),
            scale_mode: Some("FILL".to_string()),
            image_hash: Some(image_hash.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    Auto,
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl LineHeight {
    /// Scale the value, never below 1. `Auto` is left alone.
    pub fn scaled(&self, factor: f64) -> Option<LineHeight> {
        match self {
            LineHeight::Auto => None,
            LineHeight::Pixels { value } => Some(LineHeight::Pixels {
                value: (value * factor).max(1.0),
            }),
            LineHeight::Percent { value } => Some(LineHeight::Percent {
                value: (value * factor).max(1.0),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    Pixels,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub value: f64,
    pub unit: LengthUnit,
}

impl LetterSpacing {
    /// Scale the value, never below 0.
    pub fn scaled(&self, factor: f64) -> LetterSpacing {
        LetterSpacing {
            value: (self.value * factor).max(0.0),
            unit: self.unit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    None,
    WidthAndHeight,
    Height,
    Truncate,
}

/// Style attributes any node may carry. `None` means the node has no such
/// attribute at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Mixed<Vec<Paint>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<Mixed<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<Mixed<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_smoothing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<HostValue>>,
}

/// Text-only attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default)]
    pub characters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Mixed<f64>>,
    /// `None` when the host could not report the font name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<Mixed<FontName>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_horizontal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align_vertical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Mixed<LineHeight>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Mixed<LetterSpacing>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_auto_resize: Option<TextAutoResize>,
    /// Every font used across the character range.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<FontName>,
}

/// A read-only view of one host node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub node_type: NodeType,
    /// Position relative to the parent.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub absolute_transform: Transform,
    /// `None` for nodes that cannot have children.
    pub children: Option<Vec<NodeId>>,
    pub style: NodeStyle,
    pub text: Option<TextProps>,
}

impl SceneNode {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn child_ids(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// A text style mutation. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyleUpdate {
    pub font_size: Option<f64>,
    pub line_height: Option<LineHeight>,
    pub letter_spacing: Option<LetterSpacing>,
    pub auto_resize: Option<TextAutoResize>,
}

impl TextStyleUpdate {
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none()
            && self.line_height.is_none()
            && self.letter_spacing.is_none()
            && self.auto_resize.is_none()
    }
}
