//! Node classification by type marker.

use crate::config::TreeConfig;
use crate::node::TreeNode;
use serde::{Deserialize, Serialize};

/// What a node is, as far as the matchers care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A terminal content item owning a metadata record.
    LeafResource,
    /// A folder of any flavour.
    Container,
    Other,
}

/// Classifies nodes against the configured type markers.
///
/// Type markers compare case-insensitively; a node without a marker is
/// neither a leaf resource nor a container.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a TreeConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a TreeConfig) -> Self {
        Self { config }
    }

    /// Returns true if the node is a leaf resource.
    pub fn is_leaf_resource<N: TreeNode>(&self, node: &N) -> bool {
        node.type_marker()
            .map(|t| t.eq_ignore_ascii_case(&self.config.leaf_type))
            .unwrap_or(false)
    }

    /// Returns true if the node is one of the container kinds.
    pub fn is_container<N: TreeNode>(&self, node: &N) -> bool {
        match node.type_marker() {
            Some(t) => self
                .config
                .container_types
                .iter()
                .any(|c| c.eq_ignore_ascii_case(t)),
            None => false,
        }
    }

    pub fn kind<N: TreeNode>(&self, node: &N) -> NodeKind {
        if self.is_leaf_resource(node) {
            NodeKind::LeafResource
        } else if self.is_container(node) {
            NodeKind::Container
        } else {
            NodeKind::Other
        }
    }
}
