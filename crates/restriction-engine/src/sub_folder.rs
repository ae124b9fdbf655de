//! Depth matching below the anchor path.

use crate::error::Result;
use crate::node::{trim_path, TreeNode};
use crate::parser::parse_depth_rule;
use crate::pattern::RestrictionPattern;
use crate::rule::DepthRule;
use crate::types::Operator;
use tracing::debug;

/// Descent level of a path that is not below the anchor.
pub const NOT_A_DESCENDANT: i64 = -1;

/// Returns true if `candidate` is `anchor` or lies below it, segment-wise.
pub fn is_descendant(anchor: &str, candidate: &str) -> bool {
    let anchor = trim_path(anchor);
    let candidate = trim_path(candidate);
    match candidate.strip_prefix(anchor) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Number of levels between `anchor` and `candidate`.
///
/// 0 for the anchor itself, 1 for its children, [`NOT_A_DESCENDANT`] when
/// `candidate` is not below `anchor`.
pub fn descent_level(anchor: &str, candidate: &str) -> i64 {
    if !is_descendant(anchor, candidate) {
        return NOT_A_DESCENDANT;
    }
    let rest = &trim_path(candidate)[trim_path(anchor).len()..];
    rest.matches('/').count() as i64
}

/// Checks the descent level of `node` below `anchor` against `level`.
///
/// `<` and `<=` never hold for the anchor itself. Missing inputs and a
/// negative level never match.
pub fn is_required_level<N: TreeNode>(
    anchor: Option<&str>,
    level: i64,
    node: Option<&N>,
    operator: Operator,
) -> bool {
    let (Some(anchor), Some(node)) = (anchor, node) else {
        return false;
    };
    if level < 0 {
        return false;
    }

    let descent = descent_level(anchor, node.path());
    if operator.is_upper_bound() && descent <= 0 {
        return false;
    }
    operator.holds(descent.cmp(&level))
}

/// Matches nodes by how deep they sit below the rule's anchor path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubFolderPattern {
    rule: DepthRule,
}

impl SubFolderPattern {
    /// Decodes `encoded` declared at `anchor_path`.
    pub fn new(encoded: &str, anchor_path: &str) -> Result<Self> {
        Ok(Self::from_rule(parse_depth_rule(encoded, anchor_path)?))
    }

    pub fn from_rule(rule: DepthRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &DepthRule {
        &self.rule
    }

    fn is_required_level<N: TreeNode>(&self, node: &N) -> bool {
        is_required_level(
            Some(self.rule.anchor_path.as_str()),
            i64::from(self.rule.level),
            Some(node),
            self.rule.operator,
        )
    }
}

impl RestrictionPattern for SubFolderPattern {
    /// Deny rules honour negation; allow rules report the level check as is.
    fn matches_node<N: TreeNode>(&self, node: &N) -> bool {
        let in_range = self.is_required_level(node);
        let result = if self.rule.is_deny() {
            self.rule.negate != in_range
        } else {
            in_range
        };
        debug!(
            path = node.path(),
            anchor = %self.rule.anchor_path,
            level = self.rule.level,
            operator = %self.rule.operator,
            result,
            "Depth match"
        );
        result
    }

    fn matches(&self) -> bool {
        false
    }
}
