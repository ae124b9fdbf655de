//! Ancestor and descendant walks bounded by the repository root.

use crate::classifier::Classifier;
use crate::config::TreeConfig;
use crate::node::{trim_path, TreeNode};
use tracing::trace;

/// Walks the tree around a node.
///
/// Every upward walk stops at the configured repository root. Reaching the
/// tree root without meeting that boundary means the node lives outside the
/// repository; walks then give up with `None`.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    config: &'a TreeConfig,
    classifier: Classifier<'a>,
}

impl<'a> Navigator<'a> {
    pub fn new(config: &'a TreeConfig) -> Self {
        Self {
            config,
            classifier: Classifier::new(config),
        }
    }

    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Returns the nearest leaf resource at or above `node`.
    ///
    /// - `/content/dam/f/a.jpg/jcr:content/renditions/t.png` gives `/content/dam/f/a.jpg`
    /// - `/content/dam/f/a.jpg` gives itself
    /// - `/content/dam/f` gives `None`
    pub fn nearest_leaf_resource_ancestor<N: TreeNode>(&self, node: &N) -> Option<N> {
        let mut current = node.clone();
        loop {
            if self.classifier.is_leaf_resource(&current) {
                trace!(path = current.path(), "Found leaf resource ancestor");
                return Some(current);
            }
            if self.is_boundary(current.path()) {
                return None;
            }
            let parent = current.parent()?;
            if self.is_boundary(parent.path()) {
                trace!(path = node.path(), "No leaf resource below repository root");
                return None;
            }
            current = parent;
        }
    }

    /// Returns the nearest container at or above `node`.
    ///
    /// Unlike the leaf search, reaching the repository root yields the root
    /// node itself rather than `None`.
    pub fn nearest_container_ancestor<N: TreeNode>(&self, node: &N) -> Option<N> {
        let mut current = node.clone();
        loop {
            if self.classifier.is_container(&current) || self.is_boundary(current.path()) {
                trace!(path = current.path(), "Found container ancestor");
                return Some(current);
            }
            let parent = current.parent()?;
            if self.is_boundary(parent.path()) {
                trace!(path = parent.path(), "Container walk stopped at repository root");
                return Some(parent);
            }
            current = parent;
        }
    }

    /// Returns the node the property matcher should judge for `node`: its
    /// leaf resource ancestor, else its container ancestor, else itself.
    pub fn first_parent_of_leaf_or_container<N: TreeNode>(&self, node: &N) -> N {
        self.nearest_leaf_resource_ancestor(node)
            .or_else(|| self.nearest_container_ancestor(node))
            .unwrap_or_else(|| node.clone())
    }

    /// Direct children of a container.
    pub fn children<N: TreeNode>(&self, container: &N) -> Vec<N> {
        container.children()
    }

    /// Returns the metadata record of `node` (`<content>/<metadata>`), if any.
    pub fn metadata<N: TreeNode>(&self, node: &N) -> Option<N> {
        node.child(&self.config.content_child)?
            .child(&self.config.metadata_child)
    }

    pub fn has_metadata<N: TreeNode>(&self, node: &N) -> bool {
        self.metadata(node).is_some()
    }

    fn is_boundary(&self, path: &str) -> bool {
        trim_path(path) == trim_path(&self.config.repository_root)
    }
}
