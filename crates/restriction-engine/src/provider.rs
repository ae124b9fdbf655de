//! Restriction providers: turn stored restrictions into patterns.

use crate::config::TreeConfig;
use crate::error::Result;
use crate::node::TreeNode;
use crate::pattern::Pattern;
use crate::property_values::HasPropertyValuesPattern;
use crate::sub_folder::SubFolderPattern;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Restriction name of the metadata property matcher.
pub const HAS_PROPERTY_VALUES: &str = "rep:hasPropertyValues";

/// Restriction name of the depth matcher.
pub const SUB_FOLDER: &str = "rep:subFolder";

/// A named restriction as stored on an access control entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Restriction {
    pub name: String,
    pub values: Vec<String>,
}

impl Restriction {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Reads restriction `name` from a property of `node`.
    pub fn from_node<N: TreeNode>(node: &N, name: &str) -> Option<Self> {
        if !node.has_property(name) {
            return None;
        }
        if node.is_multi_valued(name) {
            Some(Self::multi(name, node.string_values(name)))
        } else {
            Some(Self::new(name, node.string_value(name)?))
        }
    }

    /// The value, if there is exactly one.
    pub fn single_value(&self) -> Option<&str> {
        match self.values.as_slice() {
            [value] => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Shape of a supported restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestrictionDefinition {
    pub name: &'static str,
    pub multi_valued: bool,
    pub mandatory: bool,
}

impl RestrictionDefinition {
    /// An optional, single-valued string restriction.
    pub const fn single(name: &'static str) -> Self {
        Self {
            name,
            multi_valued: false,
            mandatory: false,
        }
    }
}

/// Builds patterns for one restriction name.
///
/// [`Pattern::Empty`] is returned when there is no anchor path, the
/// restriction is absent, or it does not carry exactly one value. A value
/// that fails to decode is an error.
pub trait RestrictionProvider {
    fn restriction_name(&self) -> &'static str;

    /// Decodes one restriction value declared at `anchor_path`.
    fn create_pattern(&self, anchor_path: &str, encoded: &str) -> Result<Pattern>;

    fn supported_restrictions(&self) -> Vec<RestrictionDefinition> {
        vec![RestrictionDefinition::single(self.restriction_name())]
    }

    fn pattern(&self, anchor_path: Option<&str>, restrictions: &[Restriction]) -> Result<Pattern> {
        let Some(anchor_path) = anchor_path else {
            return Ok(Pattern::Empty);
        };
        match restrictions
            .iter()
            .find(|r| r.name == self.restriction_name())
        {
            Some(restriction) => self.pattern_for(anchor_path, restriction),
            None => Ok(Pattern::Empty),
        }
    }

    /// Reads the restriction straight from a stored entry node.
    fn pattern_from_node<N: TreeNode>(&self, anchor_path: Option<&str>, entry: &N) -> Result<Pattern>
    where
        Self: Sized,
    {
        let Some(anchor_path) = anchor_path else {
            return Ok(Pattern::Empty);
        };
        match Restriction::from_node(entry, self.restriction_name()) {
            Some(restriction) => self.pattern_for(anchor_path, &restriction),
            None => Ok(Pattern::Empty),
        }
    }

    fn pattern_for(&self, anchor_path: &str, restriction: &Restriction) -> Result<Pattern> {
        match restriction.single_value() {
            Some(encoded) => self.create_pattern(anchor_path, encoded),
            None => {
                debug!(
                    name = %restriction.name,
                    count = restriction.values.len(),
                    "Restriction is not single-valued, ignoring"
                );
                Ok(Pattern::Empty)
            }
        }
    }
}

/// Provides `rep:hasPropertyValues`.
#[derive(Debug, Clone, Default)]
pub struct PropertyValueRestrictionProvider {
    config: Arc<TreeConfig>,
}

impl PropertyValueRestrictionProvider {
    pub fn new(config: Arc<TreeConfig>) -> Self {
        Self { config }
    }
}

impl RestrictionProvider for PropertyValueRestrictionProvider {
    fn restriction_name(&self) -> &'static str {
        HAS_PROPERTY_VALUES
    }

    fn create_pattern(&self, anchor_path: &str, encoded: &str) -> Result<Pattern> {
        let pattern = HasPropertyValuesPattern::with_config(encoded, anchor_path, self.config.clone())?;
        Ok(pattern.into())
    }
}

/// Provides `rep:subFolder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubFolderRestrictionProvider;

impl SubFolderRestrictionProvider {
    pub fn new() -> Self {
        Self
    }
}

impl RestrictionProvider for SubFolderRestrictionProvider {
    fn restriction_name(&self) -> &'static str {
        SUB_FOLDER
    }

    fn create_pattern(&self, anchor_path: &str, encoded: &str) -> Result<Pattern> {
        Ok(SubFolderPattern::new(encoded, anchor_path)?.into())
    }
}

/// Builds the pattern for any supported restriction.
///
/// Unknown restriction names give [`Pattern::Empty`].
pub fn pattern_for_restriction(
    anchor_path: Option<&str>,
    restriction: &Restriction,
    config: Arc<TreeConfig>,
) -> Result<Pattern> {
    let restrictions = std::slice::from_ref(restriction);
    match restriction.name.as_str() {
        HAS_PROPERTY_VALUES => PropertyValueRestrictionProvider::new(config).pattern(anchor_path, restrictions),
        SUB_FOLDER => SubFolderRestrictionProvider::new().pattern(anchor_path, restrictions),
        other => {
            debug!(name = other, "Unsupported restriction");
            Ok(Pattern::Empty)
        }
    }
}
