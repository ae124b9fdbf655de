//! The matching contract shared by all restriction patterns.

use crate::node::TreeNode;
use crate::property_values::HasPropertyValuesPattern;
use crate::sub_folder::SubFolderPattern;

/// Decides whether a restriction applies to a node or path.
pub trait RestrictionPattern {
    /// Returns true if the restriction applies to `node`.
    fn matches_node<N: TreeNode>(&self, node: &N) -> bool;

    /// Returns true if the restriction applies to a bare path, with no node
    /// to inspect. Defaults to [`matches`](Self::matches).
    fn matches_path(&self, _path: &str) -> bool {
        self.matches()
    }

    /// Returns true if the restriction applies with no target at all.
    fn matches(&self) -> bool;
}

/// Any pattern a provider can hand out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Pattern {
    /// Matches everything. Stands in when no usable restriction is present.
    #[default]
    Empty,
    PropertyValues(HasPropertyValuesPattern),
    SubFolder(SubFolderPattern),
}

impl Pattern {
    pub fn is_empty(&self) -> bool {
        matches!(self, Pattern::Empty)
    }
}

impl From<HasPropertyValuesPattern> for Pattern {
    fn from(pattern: HasPropertyValuesPattern) -> Self {
        Pattern::PropertyValues(pattern)
    }
}

impl From<SubFolderPattern> for Pattern {
    fn from(pattern: SubFolderPattern) -> Self {
        Pattern::SubFolder(pattern)
    }
}

impl RestrictionPattern for Pattern {
    fn matches_node<N: TreeNode>(&self, node: &N) -> bool {
        match self {
            Pattern::Empty => true,
            Pattern::PropertyValues(p) => p.matches_node(node),
            Pattern::SubFolder(p) => p.matches_node(node),
        }
    }

    fn matches_path(&self, path: &str) -> bool {
        match self {
            Pattern::Empty => true,
            Pattern::PropertyValues(p) => p.matches_path(path),
            Pattern::SubFolder(p) => p.matches_path(path),
        }
    }

    fn matches(&self) -> bool {
        match self {
            Pattern::Empty => true,
            Pattern::PropertyValues(p) => p.matches(),
            Pattern::SubFolder(p) => p.matches(),
        }
    }
}
