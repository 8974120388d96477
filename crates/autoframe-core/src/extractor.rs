//! Snapshot extraction: host nodes to serializable descriptions.
//!
//! Two paths share the property extraction here:
//! - [`extract_node`] walks a whole subtree, classifying and renaming nodes
//!   as it goes (export path)
//! - [`describe_frame`] finds the first node per element key inside a frame
//!   and records its geometry relative to the frame (prediction path)

use std::collections::{BTreeMap, BTreeSet};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};

use autoframe_config::ClassifierConfig;
use autoframe_protocols::{
    sanitize, DesignHost, ElementDescriptor, ElementKey, ElementSlots, FontName,
    FrameDescriptor, HostError, ImageFill, Mixed, NodeId, NodeProperties, NodeSnapshot,
    NodeType, Paint, PaintSnapshot, SceneNode,
};

use crate::classifier::{classify, effective_font_size, matches_name_prefix, NameCounters};
use crate::geometry::relative_position;
use crate::tree::{descendants, find_first};

/// Result of loading the fonts used below a node.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FontLoadSummary {
    pub loaded: Vec<FontName>,
    pub failed: Vec<FontName>,
}

/// Load every font used by text nodes in the subtree rooted at `root`.
///
/// Each distinct font is requested once. Load failures are logged and
/// reported in the summary; they never abort extraction.
pub async fn load_fonts(host: &dyn DesignHost, root: &str) -> Result<FontLoadSummary, HostError> {
    let mut fonts = BTreeSet::new();
    for node in descendants(host, root)? {
        if node.node_type != NodeType::Text {
            continue;
        }
        if let Some(text) = &node.text {
            fonts.extend(text.fonts.iter().cloned());
        }
    }
    Ok(load_font_set(host, fonts).await)
}

/// Load the fonts used by a single text node.
pub async fn load_node_fonts(host: &dyn DesignHost, node: &SceneNode) -> FontLoadSummary {
    let fonts: BTreeSet<FontName> = node
        .text
        .as_ref()
        .map(|text| text.fonts.iter().cloned().collect())
        .unwrap_or_default();
    load_font_set(host, fonts).await
}

async fn load_font_set(host: &dyn DesignHost, fonts: BTreeSet<FontName>) -> FontLoadSummary {
    let mut summary = FontLoadSummary::default();
    for font in fonts {
        match host.load_font(&font).await {
            Ok(()) => {
                debug!(font = %font, "Font loaded");
                summary.loaded.push(font);
            }
            Err(e) => {
                warn!(font = %font, error = %e, "Failed to load font");
                summary.failed.push(font);
            }
        }
    }
    summary
}

/// Extract the sanitized property subset for a node.
pub fn node_properties(node: &SceneNode, config: &ClassifierConfig) -> NodeProperties {
    let mut props = NodeProperties::default();

    if node.node_type == NodeType::Text {
        if let Some(text) = &node.text {
            props.font_size = Some(effective_font_size(text, config));
            props.characters = Some(text.characters.clone());
            props.text_align_horizontal = text.text_align_horizontal.clone();
            props.text_align_vertical = text.text_align_vertical.clone();
            match &text.font_name {
                Some(name) => props.font_name = Some(name.as_option().cloned()),
                None => warn!(node = %node.id, "Font name unavailable"),
            }
        }
    }

    if node.node_type.is_shape_like() {
        let style = &node.style;
        props.strokes = style
            .strokes
            .as_ref()
            .map(|paints| paints.iter().map(PaintSnapshot::from_paint).collect());
        props.stroke_weight = style.stroke_weight.as_ref().map(|w| w.as_option().copied());
        props.stroke_align = style.stroke_align.clone();
        props.corner_radius = style.corner_radius.as_ref().map(|r| r.as_option().copied());
        props.corner_smoothing = style.corner_smoothing;
    }

    if let Some(fills) = &node.style.fills {
        props.fills = Some(
            fills
                .as_option()
                .map(|paints| paints.iter().map(PaintSnapshot::from_paint).collect()),
        );
        if let Mixed::Uniform(paints) = fills {
            props.image_fills = Some(image_fills(paints));
        }
    }

    if let Some(effects) = &node.style.effects {
        props.effects = Some(effects.iter().map(sanitize).collect());
    }

    props
}

fn image_fills(paints: &[Paint]) -> Vec<ImageFill> {
    paints
        .iter()
        .filter(|p| p.kind == Paint::IMAGE)
        .filter_map(|p| p.image_hash.clone())
        .map(|image_hash| ImageFill { image_hash })
        .collect()
}

/// Snapshot a subtree, renaming classified nodes through the host.
///
/// `frame_area` is the area of the enclosing top-level frame and `counters`
/// belongs to that frame.
pub fn extract_node(
    host: &dyn DesignHost,
    id: &str,
    frame_area: f64,
    counters: &mut NameCounters,
    config: &ClassifierConfig,
) -> Result<NodeSnapshot, HostError> {
    let node = host.node(id)?;

    let mut name = node.name.clone();
    if let Some(kind) = classify(&node, frame_area, config) {
        name = counters.next_name(kind);
        host.rename(&node.id, &name)?;
        debug!(node = %node.id, from = %node.name, to = %name, "Renamed classified node");
    }

    let properties = node_properties(&node, config);

    let children = match &node.children {
        Some(ids) => Some(
            ids.iter()
                .map(|child| extract_node(host, child, frame_area, counters, config))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        None => None,
    };

    Ok(NodeSnapshot {
        id: node.id,
        name,
        node_type: node.node_type,
        x: node.x,
        y: node.y,
        width: node.width,
        height: node.height,
        properties,
        children,
    })
}

/// Describe a frame by the first descendant matching each element key.
pub fn describe_frame(
    host: &dyn DesignHost,
    frame: &SceneNode,
    config: &ClassifierConfig,
) -> Result<FrameDescriptor, HostError> {
    let mut elements = ElementSlots::default();

    for key in ElementKey::ALL {
        let prefixes = key.name_prefixes();
        let matches = |n: &SceneNode| prefixes.iter().any(|p| matches_name_prefix(&n.name, p));
        let element = find_first(host, frame.child_ids(), &matches)?.map(|node| {
            let position = relative_position(&node.absolute_transform, &frame.absolute_transform);
            ElementDescriptor {
                x: position.x,
                y: position.y,
                width: node.width,
                height: node.height,
                properties: node_properties(&node, config),
            }
        });
        elements.set(key, element);
    }

    debug!(
        frame = %frame.name,
        found = elements.found_count(),
        "Described frame"
    );

    Ok(FrameDescriptor {
        frame_name: frame.name.clone(),
        width: frame.width,
        height: frame.height,
        elements,
    })
}

/// Describe every FRAME among `ids`; other node types are skipped.
pub fn extract_frames(
    host: &dyn DesignHost,
    ids: &[NodeId],
    config: &ClassifierConfig,
) -> Result<Vec<FrameDescriptor>, HostError> {
    let mut frames = Vec::new();
    for id in ids {
        let node = host.node(id)?;
        if node.node_type != NodeType::Frame {
            continue;
        }
        frames.push(describe_frame(host, &node, config)?);
    }
    Ok(frames)
}

/// Fetch image bytes for each hash and encode them as base64.
///
/// Hashes the host cannot resolve are logged and left out.
pub async fn collect_images<'a>(
    host: &dyn DesignHost,
    hashes: impl IntoIterator<Item = &'a str>,
) -> BTreeMap<String, String> {
    let mut images = BTreeMap::new();
    for hash in hashes {
        if images.contains_key(hash) {
            continue;
        }
        match host.image_bytes(hash).await {
            Ok(bytes) => {
                images.insert(hash.to_string(), BASE64.encode(bytes));
            }
            Err(e) => warn!(image = %hash, error = %e, "Failed to read image"),
        }
    }
    images
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
