//! Metadata property matching.

use crate::classifier::NodeKind;
use crate::comparator::{compare_typed, matches_string};
use crate::config::TreeConfig;
use crate::error::Result;
use crate::navigator::Navigator;
use crate::node::TreeNode;
use crate::parser::parse_property_rule;
use crate::pattern::RestrictionPattern;
use crate::rule::PropertyRule;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Matches nodes whose metadata record satisfies a [`PropertyRule`].
///
/// Deny rules look at the node itself. Allow rules first lift the node to
/// its leaf resource or container ancestor; a container matches when any
/// direct child's metadata matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasPropertyValuesPattern {
    rule: PropertyRule,
    config: Arc<TreeConfig>,
}

impl HasPropertyValuesPattern {
    /// Decodes `encoded` declared at `anchor_path`, with the default tree layout.
    pub fn new(encoded: &str, anchor_path: &str) -> Result<Self> {
        Self::with_config(encoded, anchor_path, Arc::new(TreeConfig::default()))
    }

    pub fn with_config(encoded: &str, anchor_path: &str, config: Arc<TreeConfig>) -> Result<Self> {
        let rule = parse_property_rule(encoded, anchor_path)?;
        Ok(Self::from_rule(rule, config))
    }

    pub fn from_rule(rule: PropertyRule, config: Arc<TreeConfig>) -> Self {
        Self { rule, config }
    }

    pub fn rule(&self) -> &PropertyRule {
        &self.rule
    }

    /// Evaluates the pattern with `now` standing in for `today`.
    pub fn matches_node_at<N: TreeNode>(&self, node: &N, now: DateTime<Utc>) -> bool {
        if self.rule.is_deny() {
            self.deny_match(node, now)
        } else {
            self.allow_match(node, now)
        }
    }

    /// Returns true if the metadata record of `node` satisfies the rule,
    /// ignoring access type and negation.
    ///
    /// Multi-valued properties match when any value compares true. A
    /// single-valued property only gets string membership, whatever the
    /// rule's value type.
    pub fn is_match<N: TreeNode>(&self, node: &N, now: DateTime<Utc>) -> bool {
        let Some(metadata) = self.navigator().metadata(node) else {
            return false;
        };
        let property = self.rule.property.as_str();

        if !metadata.has_property(property) {
            debug!(metadata = metadata.path(), property, "Restriction property not present");
            return false;
        }

        let matched = if metadata.is_multi_valued(property) {
            metadata.string_values(property).iter().any(|value| {
                compare_typed(
                    self.rule.value_type,
                    self.rule.operator,
                    &self.rule.values,
                    value,
                    &self.config.date_format,
                    now,
                )
            })
        } else {
            // TODO: apply int/date comparison to single-valued properties once
            // product confirms `n > 1` on a single value should order numerically.
            metadata
                .string_value(property)
                .map(|value| matches_string(&self.rule.values, &value))
                .unwrap_or(false)
        };

        debug!(
            metadata = metadata.path(),
            property,
            multi_valued = metadata.is_multi_valued(property),
            value_type = %self.rule.value_type,
            matched,
            "Evaluated metadata"
        );
        matched
    }

    fn navigator(&self) -> Navigator<'_> {
        Navigator::new(&self.config)
    }

    fn check_node<N: TreeNode>(&self, node: &N, now: DateTime<Utc>) -> bool {
        self.navigator().has_metadata(node) && self.is_match(node, now)
    }

    fn deny_match<N: TreeNode>(&self, node: &N, now: DateTime<Utc>) -> bool {
        if !self.navigator().has_metadata(node) {
            debug!(path = node.path(), "Deny rule does not apply without metadata");
            return false;
        }
        let result = self.rule.negate != self.is_match(node, now);
        debug!(path = node.path(), negate = self.rule.negate, result, "Deny match");
        result
    }

    fn allow_match<N: TreeNode>(&self, node: &N, now: DateTime<Utc>) -> bool {
        let navigator = self.navigator();
        let anchor = navigator.first_parent_of_leaf_or_container(node);
        match navigator.classifier().kind(&anchor) {
            NodeKind::LeafResource => {
                let result = self.rule.negate != self.check_node(&anchor, now);
                debug!(path = anchor.path(), result, "Allow match on leaf resource");
                result
            }
            NodeKind::Container => {
                let matching = navigator
                    .children(&anchor)
                    .into_iter()
                    .find(|child| self.check_node(child, now));
                if let Some(child) = &matching {
                    debug!(path = anchor.path(), child = child.name(), "Allow match on container");
                } else {
                    debug!(path = anchor.path(), "No child of container matches");
                }
                matching.is_some()
            }
            NodeKind::Other => {
                let result = self.rule.negate != self.check_node(&anchor, now);
                debug!(path = anchor.path(), result, "Allow match on unclassified node");
                result
            }
        }
    }
}

impl RestrictionPattern for HasPropertyValuesPattern {
    fn matches_node<N: TreeNode>(&self, node: &N) -> bool {
        self.matches_node_at(node, Utc::now())
    }

    fn matches(&self) -> bool {
        false
    }
}
