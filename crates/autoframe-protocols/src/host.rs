//! Host document trait definition.

use async_trait::async_trait;

use crate::error::HostError;
use crate::types::{FontName, NodeId, SceneNode, TextStyleUpdate};

/// The document environment that owns the live node tree.
///
/// Reads return owned snapshots; mutations address nodes by id. Clones get
/// fresh ids, so callers must re-resolve nodes inside a clone instead of
/// reusing ids obtained before cloning.
#[async_trait]
pub trait DesignHost: Send + Sync {
    /// Ids of the currently selected nodes, in selection order.
    fn selection(&self) -> Vec<NodeId>;

    /// Ids of the current page's top-level nodes.
    fn top_level_nodes(&self) -> Vec<NodeId>;

    /// Read a node.
    fn node(&self, id: &str) -> Result<SceneNode, HostError>;

    fn rename(&self, id: &str, name: &str) -> Result<(), HostError>;

    /// Deep-clone a subtree, inserting the copy next to the original.
    fn clone_node(&self, id: &str) -> Result<NodeId, HostError>;

    /// Set the parent-relative position.
    fn move_to(&self, id: &str, x: f64, y: f64) -> Result<(), HostError>;

    /// Resize without applying child constraints.
    fn resize(&self, id: &str, width: f64, height: f64) -> Result<(), HostError>;

    /// Update text metrics. Changing the font size requires the node's fonts
    /// to be loaded.
    fn set_text_style(&self, id: &str, update: &TextStyleUpdate) -> Result<(), HostError>;

    async fn load_font(&self, font: &FontName) -> Result<(), HostError>;

    /// Raw bytes of an image resource.
    async fn image_bytes(&self, image_hash: &str) -> Result<Vec<u8>, HostError>;

    /// Show a user-visible notice.
    fn notify(&self, message: &str);
}
