//! In-memory [`DesignHost`] implementation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use autoframe_protocols::{
    DesignHost, FontName, HostError, Mixed, NodeId, NodeStyle, NodeType, SceneNode, TextProps,
    TextStyleUpdate, Transform,
};

use crate::document::{DocumentFile, NodeSpec};
use crate::error::MemoryHostError;

/// Stored node with a parent link; children are kept as ids.
#[derive(Debug, Clone)]
struct StoredNode {
    id: NodeId,
    name: String,
    node_type: NodeType,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    parent: Option<NodeId>,
    children: Option<Vec<NodeId>>,
    style: NodeStyle,
    text: Option<TextProps>,
}

#[derive(Debug, Default)]
struct DocumentState {
    name: String,
    roots: Vec<NodeId>,
    nodes: HashMap<NodeId, StoredNode>,
    selection: Vec<NodeId>,
}

impl DocumentState {
    fn get(&self, id: &str) -> Result<&StoredNode, HostError> {
        self.nodes
            .get(id)
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut StoredNode, HostError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))
    }

    fn insert_spec(&mut self, spec: NodeSpec, parent: Option<NodeId>) -> Result<NodeId, MemoryHostError> {
        if self.nodes.contains_key(&spec.id) {
            return Err(MemoryHostError::DuplicateId(spec.id));
        }
        let id = spec.id.clone();
        let children = match spec.children {
            Some(children) => {
                let mut ids = Vec::with_capacity(children.len());
                for child in children {
                    ids.push(self.insert_spec(child, Some(id.clone()))?);
                }
                Some(ids)
            }
            None => None,
        };
        self.nodes.insert(
            id.clone(),
            StoredNode {
                id: id.clone(),
                name: spec.name,
                node_type: spec.node_type,
                x: spec.x,
                y: spec.y,
                width: spec.width,
                height: spec.height,
                parent,
                children,
                style: spec.style,
                text: spec.text,
            },
        );
        Ok(id)
    }

    fn to_spec(&self, id: &str) -> Option<NodeSpec> {
        let node = self.nodes.get(id)?;
        Some(NodeSpec {
            id: node.id.clone(),
            name: node.name.clone(),
            node_type: node.node_type,
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            style: node.style.clone(),
            text: node.text.clone(),
            children: node
                .children
                .as_ref()
                .map(|ids| ids.iter().filter_map(|c| self.to_spec(c)).collect()),
        })
    }

    /// Sum of the node's and its ancestors' offsets.
    fn absolute_origin(&self, id: &str) -> Result<(f64, f64), HostError> {
        let mut node = self.get(id)?;
        let (mut x, mut y) = (node.x, node.y);
        while let Some(parent) = &node.parent {
            node = self.get(parent)?;
            x += node.x;
            y += node.y;
        }
        Ok((x, y))
    }

    fn copy_subtree(&mut self, id: &str, parent: Option<NodeId>) -> Result<NodeId, HostError> {
        let original = self.get(id)?.clone();
        let new_id = format!("{}-{}", original.id, Uuid::new_v4().simple());
        let children = match &original.children {
            Some(ids) => {
                let mut copies = Vec::with_capacity(ids.len());
                for child in ids {
                    copies.push(self.copy_subtree(child, Some(new_id.clone()))?);
                }
                Some(copies)
            }
            None => None,
        };
        self.nodes.insert(
            new_id.clone(),
            StoredNode {
                id: new_id.clone(),
                parent,
                children,
                ..original
            },
        );
        Ok(new_id)
    }
}

/// Design document held entirely in memory.
///
/// Besides serving the [`DesignHost`] operations it records the side effects
/// a caller may want to inspect: notices shown, fonts loaded, and how many
/// mutations were made.
pub struct MemoryHost {
    state: RwLock<DocumentState>,
    images: HashMap<String, Vec<u8>>,
    available_fonts: Option<HashSet<FontName>>,
    loaded_fonts: RwLock<HashSet<FontName>>,
    notices: Mutex<Vec<String>>,
    mutations: AtomicUsize,
}

impl MemoryHost {
    /// Build a host from a parsed document.
    pub fn from_document(document: DocumentFile) -> Result<Self, MemoryHostError> {
        let mut state = DocumentState {
            name: document.name,
            ..Default::default()
        };
        for spec in document.nodes {
            let id = state.insert_spec(spec, None)?;
            state.roots.push(id);
        }
        for id in &document.selection {
            if !state.nodes.contains_key(id) {
                return Err(MemoryHostError::UnknownSelection(id.clone()));
            }
        }
        state.selection = document.selection;

        let mut images = HashMap::with_capacity(document.images.len());
        for (hash, encoded) in document.images {
            let bytes = BASE64
                .decode(encoded.as_bytes())
                .map_err(|e| MemoryHostError::InvalidImage {
                    hash: hash.clone(),
                    message: e.to_string(),
                })?;
            images.insert(hash, bytes);
        }

        debug!(
            document = %state.name,
            nodes = state.nodes.len(),
            images = images.len(),
            "Loaded document"
        );

        Ok(Self {
            state: RwLock::new(state),
            images,
            available_fonts: document.available_fonts.map(|fonts| fonts.into_iter().collect()),
            loaded_fonts: RwLock::new(HashSet::new()),
            notices: Mutex::new(Vec::new()),
            mutations: AtomicUsize::new(0),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, MemoryHostError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MemoryHostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MemoryHostError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Current state of the document in the on-disk format.
    pub fn to_document(&self) -> DocumentFile {
        let state = self.state.read();
        DocumentFile {
            name: state.name.clone(),
            selection: state.selection.clone(),
            available_fonts: self.available_fonts.as_ref().map(|fonts| {
                let mut fonts: Vec<FontName> = fonts.iter().cloned().collect();
                fonts.sort();
                fonts
            }),
            images: self
                .images
                .iter()
                .map(|(hash, bytes)| (hash.clone(), BASE64.encode(bytes)))
                .collect::<BTreeMap<_, _>>(),
            nodes: state.roots.iter().filter_map(|id| state.to_spec(id)).collect(),
        }
    }

    /// Write the current document to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MemoryHostError> {
        let json = serde_json::to_string_pretty(&self.to_document())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn set_selection(&self, ids: Vec<NodeId>) {
        self.state.write().selection = ids;
    }

    /// First node with this exact name, searching depth-first from the roots.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        let state = self.state.read();
        let mut stack: Vec<&NodeId> = state.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            let node = state.nodes.get(id)?;
            if node.name == name {
                return Some(id.clone());
            }
            if let Some(children) = &node.children {
                stack.extend(children.iter().rev());
            }
        }
        None
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    pub fn loaded_fonts(&self) -> Vec<FontName> {
        let mut fonts: Vec<FontName> = self.loaded_fonts.read().iter().cloned().collect();
        fonts.sort();
        fonts
    }

    /// Number of successful mutating calls so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn mutated(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DesignHost for MemoryHost {
    fn selection(&self) -> Vec<NodeId> {
        self.state.read().selection.clone()
    }

    fn top_level_nodes(&self) -> Vec<NodeId> {
        self.state.read().roots.clone()
    }

    fn node(&self, id: &str) -> Result<SceneNode, HostError> {
        let state = self.state.read();
        let node = state.get(id)?;
        let (ax, ay) = state.absolute_origin(id)?;
        Ok(SceneNode {
            id: node.id.clone(),
            name: node.name.clone(),
            node_type: node.node_type,
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            absolute_transform: Transform::translate(ax, ay),
            children: node.children.clone(),
            style: node.style.clone(),
            text: node.text.clone(),
        })
    }

    fn rename(&self, id: &str, name: &str) -> Result<(), HostError> {
        self.state.write().get_mut(id)?.name = name.to_string();
        self.mutated();
        Ok(())
    }

    fn clone_node(&self, id: &str) -> Result<NodeId, HostError> {
        let mut state = self.state.write();
        let parent = state.get(id)?.parent.clone();
        let new_id = state.copy_subtree(id, parent.clone())?;

        let siblings = match &parent {
            Some(parent) => state
                .get_mut(parent)?
                .children
                .get_or_insert_with(Vec::new),
            None => &mut state.roots,
        };
        let index = siblings
            .iter()
            .position(|sibling| sibling == id)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, new_id.clone());
        drop(state);

        self.mutated();
        debug!(source = %id, clone = %new_id, "Cloned node");
        Ok(new_id)
    }

    fn move_to(&self, id: &str, x: f64, y: f64) -> Result<(), HostError> {
        let mut state = self.state.write();
        let node = state.get_mut(id)?;
        node.x = x;
        node.y = y;
        drop(state);
        self.mutated();
        Ok(())
    }

    fn resize(&self, id: &str, width: f64, height: f64) -> Result<(), HostError> {
        let mut state = self.state.write();
        let node = state.get_mut(id)?;
        if !node.node_type.supports_resize() {
            return Err(HostError::unsupported("resize", node.node_type.as_str()));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(HostError::Operation(format!(
                "Cannot resize {id} to {width}x{height}"
            )));
        }
        node.width = width;
        node.height = height;
        drop(state);
        self.mutated();
        Ok(())
    }

    fn set_text_style(&self, id: &str, update: &TextStyleUpdate) -> Result<(), HostError> {
        let mut state = self.state.write();
        let node = state.get_mut(id)?;
        if node.node_type != NodeType::Text {
            return Err(HostError::unsupported("set_text_style", node.node_type.as_str()));
        }
        let text = node.text.get_or_insert_with(TextProps::default);

        if update.font_size.is_some() || update.line_height.is_some() || update.letter_spacing.is_some() {
            let loaded = self.loaded_fonts.read();
            if let Some(missing) = text.fonts.iter().find(|font| !loaded.contains(*font)) {
                return Err(HostError::FontLoad {
                    family: missing.family.clone(),
                    style: missing.style.clone(),
                    message: "font must be loaded before editing text".to_string(),
                });
            }
        }

        if let Some(size) = update.font_size {
            text.font_size = Some(Mixed::Uniform(size));
        }
        if let Some(line_height) = update.line_height {
            text.line_height = Some(Mixed::Uniform(line_height));
        }
        if let Some(spacing) = update.letter_spacing {
            text.letter_spacing = Some(Mixed::Uniform(spacing));
        }
        if let Some(mode) = update.auto_resize {
            text.text_auto_resize = Some(mode);
        }
        drop(state);
        self.mutated();
        Ok(())
    }

    async fn load_font(&self, font: &FontName) -> Result<(), HostError> {
        if let Some(available) = &self.available_fonts {
            if !available.contains(font) {
                return Err(HostError::FontLoad {
                    family: font.family.clone(),
                    style: font.style.clone(),
                    message: "font is not available".to_string(),
                });
            }
        }
        self.loaded_fonts.write().insert(font.clone());
        Ok(())
    }

    async fn image_bytes(&self, image_hash: &str) -> Result<Vec<u8>, HostError> {
        self.images
            .get(image_hash)
            .cloned()
            .ok_or_else(|| HostError::ImageNotFound(image_hash.to_string()))
    }

    fn notify(&self, message: &str) {
        info!(notice = %message, "Notice");
        self.notices.lock().push(message.to_string());
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
