//! On-disk document format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use autoframe_protocols::{FontName, NodeStyle, NodeType, TextProps};

/// A serialized design document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    #[serde(default)]
    pub name: String,

    /// Node ids selected when the document is opened.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<String>,

    /// Fonts the host can load. `None` means every font loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_fonts: Option<Vec<FontName>>,

    /// Image bytes keyed by hash, base64 encoded.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, String>,

    /// Top-level nodes of the page.
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
}

/// A node and its subtree. Coordinates are relative to the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub node_type: NodeType,

    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    #[serde(default)]
    pub width: f64,

    #[serde(default)]
    pub height: f64,

    #[serde(flatten)]
    pub style: NodeStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextProps>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSpec>>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            style: NodeStyle::default(),
            text: None,
            children: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_text(mut self, text: TextProps) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_children(mut self, children: Vec<NodeSpec>) -> Self {
        self.children = Some(children);
        self
    }
}
