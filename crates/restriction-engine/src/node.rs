//! Read-only view of the repository tree.
//!
//! The engine never owns the tree: the host hands in nodes implementing
//! [`TreeNode`] and the matchers only navigate and read them. [`MemoryTree`]
//! is an owned implementation used by tests, the WASM surface and hosts that
//! ship tree snapshots as JSON or YAML.

use crate::error::{RestrictionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A position in the hierarchical resource tree.
pub trait TreeNode: Sized + Clone {
    /// Absolute path of the node (`/` for the tree root).
    fn path(&self) -> &str;

    /// Last path segment.
    fn name(&self) -> &str;

    /// Type marker of the node, if any.
    fn type_marker(&self) -> Option<&str>;

    /// Parent node, `None` at the tree root.
    fn parent(&self) -> Option<Self>;

    /// Direct child with the given name.
    fn child(&self, name: &str) -> Option<Self>;

    /// Direct children in tree order.
    fn children(&self) -> Vec<Self>;

    fn has_property(&self, name: &str) -> bool;

    /// Returns true if the property exists and holds several values.
    fn is_multi_valued(&self, name: &str) -> bool;

    /// Single value of a property.
    fn string_value(&self, name: &str) -> Option<String>;

    /// All values of a multi-valued property.
    fn string_values(&self, name: &str) -> Vec<String>;

    fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }
}

/// A single- or multi-valued string property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Single(String),
    Multi(Vec<String>),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Single(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Single(value)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        PropertyValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::Multi(values)
    }
}

/// Serialized form of a subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Segment name; ignored for the snapshot root.
    #[serde(default)]
    pub name: String,

    /// Type marker.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Node properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,

    /// Child nodes in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    path: String,
    parent: Option<usize>,
    node_type: Option<String>,
    properties: BTreeMap<String, PropertyValue>,
    children: Vec<usize>,
}

impl NodeData {
    fn new(name: &str, path: String, parent: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            path,
            parent,
            node_type: None,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }
}

/// An owned, in-memory tree.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<NodeData>,
}

impl MemoryTree {
    /// Creates a tree holding only the root node `/`.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new("", "/".to_string(), None)],
        }
    }

    /// Builds a tree from a snapshot of its root.
    ///
    /// Fails with [`RestrictionError::ParseError`] when a child name is empty
    /// or contains `/`. The root's own name is ignored.
    pub fn from_snapshot(snapshot: &NodeSnapshot) -> Result<Self> {
        let mut tree = Self::new();
        tree.nodes[0].node_type = snapshot.node_type.clone();
        tree.nodes[0].properties = snapshot.properties.clone();
        for child in &snapshot.children {
            tree.insert_snapshot(0, child)?;
        }
        Ok(tree)
    }

    /// Parses a tree from a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: NodeSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(&snapshot)
    }

    /// Parses a tree from a YAML snapshot.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let snapshot: NodeSnapshot = serde_yaml::from_str(yaml)?;
        Self::from_snapshot(&snapshot)
    }

    /// Captures the tree as a snapshot.
    pub fn to_snapshot(&self) -> NodeSnapshot {
        self.snapshot_of(0)
    }

    /// Returns the root node.
    pub fn root(&self) -> MemoryNode<'_> {
        MemoryNode { tree: self, index: 0 }
    }

    /// Looks up a node by absolute path.
    pub fn node(&self, path: &str) -> Option<MemoryNode<'_>> {
        let mut index = 0;
        for segment in segments(path) {
            index = self.child_index(index, segment)?;
        }
        Some(MemoryNode { tree: self, index })
    }

    /// Creates every missing node along `path`.
    pub fn add_path(&mut self, path: &str) -> &mut Self {
        self.ensure(path);
        self
    }

    /// Sets the type marker of the node at `path`, creating it if needed.
    pub fn set_type(&mut self, path: &str, node_type: impl Into<String>) -> &mut Self {
        let index = self.ensure(path);
        self.nodes[index].node_type = Some(node_type.into());
        self
    }

    /// Sets a property on the node at `path`, creating it if needed.
    pub fn set_property(
        &mut self,
        path: &str,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> &mut Self {
        let index = self.ensure(path);
        self.nodes[index].properties.insert(name.into(), value.into());
        self
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn ensure(&mut self, path: &str) -> usize {
        let mut index = 0;
        for segment in segments(path) {
            index = match self.child_index(index, segment) {
                Some(child) => child,
                None => self.push_child(index, segment),
            };
        }
        index
    }

    fn push_child(&mut self, parent: usize, name: &str) -> usize {
        let parent_path = &self.nodes[parent].path;
        let path = if parent_path == "/" {
            format!("/{}", name)
        } else {
            format!("{}/{}", parent_path, name)
        };
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(name, path, Some(parent)));
        self.nodes[parent].children.push(index);
        index
    }

    fn insert_snapshot(&mut self, parent: usize, snapshot: &NodeSnapshot) -> Result<()> {
        if snapshot.name.is_empty() || snapshot.name.contains('/') {
            return Err(RestrictionError::ParseError(format!(
                "Invalid node name {:?} under {}",
                snapshot.name, self.nodes[parent].path
            )));
        }
        let index = match self.child_index(parent, &snapshot.name) {
            Some(existing) => existing,
            None => self.push_child(parent, &snapshot.name),
        };
        if snapshot.node_type.is_some() {
            self.nodes[index].node_type = snapshot.node_type.clone();
        }
        self.nodes[index]
            .properties
            .extend(snapshot.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        for child in &snapshot.children {
            self.insert_snapshot(index, child)?;
        }
        Ok(())
    }

    fn snapshot_of(&self, index: usize) -> NodeSnapshot {
        let data = &self.nodes[index];
        NodeSnapshot {
            name: data.name.clone(),
            node_type: data.node_type.clone(),
            properties: data.properties.clone(),
            children: data.children.iter().map(|&c| self.snapshot_of(c)).collect(),
        }
    }

    fn child_index(&self, parent: usize, name: &str) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].name == name)
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops trailing slashes; the root `/` becomes the empty string.
pub(crate) fn trim_path(path: &str) -> &str {
    path.trim_end_matches('/')
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Borrowed handle to a node of a [`MemoryTree`].
#[derive(Debug, Clone, Copy)]
pub struct MemoryNode<'a> {
    tree: &'a MemoryTree,
    index: usize,
}

impl<'a> MemoryNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.index]
    }

    fn at(&self, index: usize) -> Self {
        MemoryNode {
            tree: self.tree,
            index,
        }
    }
}

impl PartialEq for MemoryNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for MemoryNode<'_> {}

impl TreeNode for MemoryNode<'_> {
    fn path(&self) -> &str {
        &self.data().path
    }

    fn name(&self) -> &str {
        &self.data().name
    }

    fn type_marker(&self) -> Option<&str> {
        self.data().node_type.as_deref()
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|p| self.at(p))
    }

    fn child(&self, name: &str) -> Option<Self> {
        self.tree.child_index(self.index, name).map(|c| self.at(c))
    }

    fn children(&self) -> Vec<Self> {
        self.data().children.iter().map(|&c| self.at(c)).collect()
    }

    fn has_property(&self, name: &str) -> bool {
        self.data().properties.contains_key(name)
    }

    fn is_multi_valued(&self, name: &str) -> bool {
        matches!(self.data().properties.get(name), Some(PropertyValue::Multi(_)))
    }

    fn string_value(&self, name: &str) -> Option<String> {
        match self.data().properties.get(name)? {
            PropertyValue::Single(value) => Some(value.clone()),
            PropertyValue::Multi(values) => values.first().cloned(),
        }
    }

    fn string_values(&self, name: &str) -> Vec<String> {
        match self.data().properties.get(name) {
            Some(PropertyValue::Single(value)) => vec![value.clone()],
            Some(PropertyValue::Multi(values)) => values.clone(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_navigate() {
        let mut tree = MemoryTree::new();
        tree.set_type("/content/dam/folder", "nt:folder")
            .set_property("/content/dam/folder/a.jpg/jcr:content/metadata", "dc:title", "A");

        let asset = tree.node("/content/dam/folder/a.jpg").unwrap();
        assert_eq!(asset.path(), "/content/dam/folder/a.jpg");
        assert_eq!(asset.name(), "a.jpg");
        assert_eq!(asset.parent().unwrap().path(), "/content/dam/folder");
        assert_eq!(asset.parent().unwrap().type_marker(), Some("nt:folder"));
        assert!(asset.has_child("jcr:content"));
        assert!(tree.root().parent().is_none());
        assert!(tree.node("/content/missing").is_none());
    }

    #[test]
    fn test_properties() {
        let mut tree = MemoryTree::new();
        tree.set_property("/a", "single", "x")
            .set_property("/a", "multi", vec!["y", "z"]);

        let node = tree.node("/a").unwrap();
        assert!(node.has_property("single"));
        assert!(!node.is_multi_valued("single"));
        assert!(node.is_multi_valued("multi"));
        assert_eq!(node.string_value("single").as_deref(), Some("x"));
        assert_eq!(node.string_values("multi"), vec!["y", "z"]);
        assert!(!node.has_property("absent"));
        assert!(node.string_values("absent").is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = MemoryTree::new();
        tree.add_path("/f/b").add_path("/f/a").add_path("/f/c");
        let names: Vec<String> = tree
            .node("/f")
            .unwrap()
            .children()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_json_snapshot() {
        let json = r#"{
            "children": [{
                "name": "content",
                "children": [{
                    "name": "dam",
                    "children": [{
                        "name": "photo.jpg",
                        "type": "dam:Asset",
                        "children": [{
                            "name": "jcr:content",
                            "children": [{
                                "name": "metadata",
                                "properties": {"cq:tags": ["portrait", "landscape"], "rating": "4"}
                            }]
                        }]
                    }]
                }]
            }]
        }"#;
        let tree = MemoryTree::from_json(json).unwrap();
        let metadata = tree.node("/content/dam/photo.jpg/jcr:content/metadata").unwrap();
        assert!(metadata.is_multi_valued("cq:tags"));
        assert_eq!(metadata.string_value("rating").as_deref(), Some("4"));
        assert_eq!(
            tree.node("/content/dam/photo.jpg").unwrap().type_marker(),
            Some("dam:Asset")
        );
    }

    #[test]
    fn test_snapshot_roundtrip_through_yaml() {
        let mut tree = MemoryTree::new();
        tree.set_type("/content/dam/f", "sling:Folder")
            .set_property("/content/dam/f/x/jcr:content/metadata", "n", vec!["1", "2"]);
        let yaml = serde_yaml::to_string(&tree.to_snapshot()).unwrap();
        let restored = MemoryTree::from_yaml(&yaml).unwrap();
        assert_eq!(restored.to_snapshot(), tree.to_snapshot());
        assert_eq!(restored.len(), tree.len());
    }

    #[test]
    fn test_trim_path() {
        assert_eq!(trim_path("/content/dam/"), "/content/dam");
        assert_eq!(trim_path("/content/dam"), "/content/dam");
        assert_eq!(trim_path("/"), "");
        assert_eq!(trim_path("//"), "");
    }

    #[test]
    fn test_snapshot_rejects_unusable_names() {
        let slashed = r#"{"children": [{"name": "content", "children": [{"name": "dam/public"}]}]}"#;
        assert!(matches!(
            MemoryTree::from_json(slashed),
            Err(RestrictionError::ParseError(message)) if message.contains("dam/public")
        ));

        let unnamed = "children:\n  - name: content\n    children:\n      - type: dam:Asset\n";
        assert!(matches!(
            MemoryTree::from_yaml(unnamed),
            Err(RestrictionError::ParseError(_))
        ));

        let snapshot = NodeSnapshot {
            name: "ignored/root".to_string(),
            children: vec![NodeSnapshot { name: "content".to_string(), ..Default::default() }],
            ..Default::default()
        };
        assert_eq!(MemoryTree::from_snapshot(&snapshot).unwrap().len(), 2);
    }
}
