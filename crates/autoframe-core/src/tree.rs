//! Depth-first traversal over host nodes.

use autoframe_protocols::{DesignHost, HostError, NodeId, SceneNode};

/// First node in pre-order below `ids` (inclusive) matching `predicate`.
pub fn find_first(
    host: &dyn DesignHost,
    ids: &[NodeId],
    predicate: &dyn Fn(&SceneNode) -> bool,
) -> Result<Option<SceneNode>, HostError> {
    for id in ids {
        let node = host.node(id)?;
        if predicate(&node) {
            return Ok(Some(node));
        }
        if let Some(found) = find_first(host, node.child_ids(), predicate)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Every node in the subtree rooted at `root`, in pre-order.
pub fn descendants(host: &dyn DesignHost, root: &str) -> Result<Vec<SceneNode>, HostError> {
    let mut nodes = Vec::new();
    let mut stack = vec![root.to_string()];
    while let Some(id) = stack.pop() {
        let node = host.node(&id)?;
        stack.extend(node.child_ids().iter().rev().cloned());
        nodes.push(node);
    }
    Ok(nodes)
}
