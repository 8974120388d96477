//! Semantic element keys and the frame descriptor.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeProperties;

/// One of the fixed semantic slots a frame descriptor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKey {
    Logo,
    TextGroup,
    ImageGroup,
    SaleGroup,
    Disclaimer,
    #[serde(rename = "age_restriction")]
    AgeRestriction,
    SalesBadge,
    SaleText,
    Text,
    Frame,
}

impl ElementKey {
    /// Table order; also the search order of the frame extractor.
    pub const ALL: [ElementKey; 10] = [
        ElementKey::Logo,
        ElementKey::TextGroup,
        ElementKey::ImageGroup,
        ElementKey::SaleGroup,
        ElementKey::Disclaimer,
        ElementKey::AgeRestriction,
        ElementKey::SalesBadge,
        ElementKey::SaleText,
        ElementKey::Text,
        ElementKey::Frame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKey::Logo => "logo",
            ElementKey::TextGroup => "textGroup",
            ElementKey::ImageGroup => "imageGroup",
            ElementKey::SaleGroup => "saleGroup",
            ElementKey::Disclaimer => "disclaimer",
            ElementKey::AgeRestriction => "age_restriction",
            ElementKey::SalesBadge => "salesBadge",
            ElementKey::SaleText => "saleText",
            ElementKey::Text => "text",
            ElementKey::Frame => "frame",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Node-name prefixes accepted for this slot, compared case-insensitively.
    pub fn name_prefixes(&self) -> &'static [&'static str] {
        match self {
            ElementKey::Logo => &["logo"],
            ElementKey::TextGroup => &["textGroup", "text_group", "textframe"],
            ElementKey::ImageGroup => &["imageGroup", "image_group", "imageframe", "main_image"],
            ElementKey::SaleGroup => &["saleGroup", "sale_group"],
            ElementKey::Disclaimer => &["disclaimer"],
            ElementKey::AgeRestriction => &["age_restriction", "ageRestriction"],
            ElementKey::SalesBadge => &["salesBadge", "sales_badge"],
            ElementKey::SaleText => &["saleText", "sale_text"],
            ElementKey::Text => &["text"],
            ElementKey::Frame => &["frame"],
        }
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered element, positioned relative to its frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementDescriptor {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub properties: NodeProperties,
}

/// One slot per [`ElementKey`]; absent elements serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementSlots {
    pub logo: Option<ElementDescriptor>,
    #[serde(rename = "textGroup")]
    pub text_group: Option<ElementDescriptor>,
    #[serde(rename = "imageGroup")]
    pub image_group: Option<ElementDescriptor>,
    #[serde(rename = "saleGroup")]
    pub sale_group: Option<ElementDescriptor>,
    pub disclaimer: Option<ElementDescriptor>,
    pub age_restriction: Option<ElementDescriptor>,
    #[serde(rename = "salesBadge")]
    pub sales_badge: Option<ElementDescriptor>,
    #[serde(rename = "saleText")]
    pub sale_text: Option<ElementDescriptor>,
    pub text: Option<ElementDescriptor>,
    pub frame: Option<ElementDescriptor>,
}

impl ElementSlots {
    pub fn get(&self, key: ElementKey) -> Option<&ElementDescriptor> {
        self.slot(key).as_ref()
    }

    pub fn set(&mut self, key: ElementKey, element: Option<ElementDescriptor>) {
        *self.slot_mut(key) = element;
    }

    /// All slots in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementKey, Option<&ElementDescriptor>)> + '_ {
        ElementKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    pub fn found_count(&self) -> usize {
        self.iter().filter(|(_, element)| element.is_some()).count()
    }

    fn slot(&self, key: ElementKey) -> &Option<ElementDescriptor> {
        match key {
            ElementKey::Logo => &self.logo,
            ElementKey::TextGroup => &self.text_group,
            ElementKey::ImageGroup => &self.image_group,
            ElementKey::SaleGroup => &self.sale_group,
            ElementKey::Disclaimer => &self.disclaimer,
            ElementKey::AgeRestriction => &self.age_restriction,
            ElementKey::SalesBadge => &self.sales_badge,
            ElementKey::SaleText => &self.sale_text,
            ElementKey::Text => &self.text,
            ElementKey::Frame => &self.frame,
        }
    }

    fn slot_mut(&mut self, key: ElementKey) -> &mut Option<ElementDescriptor> {
        match key {
            ElementKey::Logo => &mut self.logo,
            ElementKey::TextGroup => &mut self.text_group,
            ElementKey::ImageGroup => &mut self.image_group,
            ElementKey::SaleGroup => &mut self.sale_group,
            ElementKey::Disclaimer => &mut self.disclaimer,
            ElementKey::AgeRestriction => &mut self.age_restriction,
            ElementKey::SalesBadge => &mut self.sales_badge,
            ElementKey::SaleText => &mut self.sale_text,
            ElementKey::Text => &mut self.text,
            ElementKey::Frame => &mut self.frame,
        }
    }
}

/// Normalized snapshot of one frame and its semantic elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescriptor {
    pub frame_name: String,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub elements: ElementSlots,
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;
