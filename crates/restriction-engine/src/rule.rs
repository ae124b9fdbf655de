//! Decoded restriction rules.

use crate::parser::RuleEncoding;
use crate::types::{AccessType, Operator, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rule over a metadata property of leaf resources.
///
/// Displays as its canonical encoding, e.g. `deny#string$!cq:tags==a,b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyRule {
    pub access: AccessType,
    pub negate: bool,
    pub value_type: ValueType,
    pub operator: Operator,
    /// Metadata property to inspect.
    pub property: String,
    /// Operands; ordered comparisons use the first one.
    pub values: Vec<String>,
    /// Path the restriction was declared on.
    pub anchor_path: String,
}

impl PropertyRule {
    pub fn is_deny(&self) -> bool {
        self.access == AccessType::Deny
    }
}

impl fmt::Display for PropertyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&RuleEncoding::CURRENT.encode_property(self))
    }
}

/// A rule over how deep a node sits below the anchor path.
///
/// Displays as its canonical encoding, e.g. `deny#!>=2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepthRule {
    pub access: AccessType,
    pub negate: bool,
    pub operator: Operator,
    pub level: u32,
    pub anchor_path: String,
}

impl DepthRule {
    pub fn is_deny(&self) -> bool {
        self.access == AccessType::Deny
    }
}

impl fmt::Display for DepthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&RuleEncoding::CURRENT.encode_depth(self))
    }
}
