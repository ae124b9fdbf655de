//! Tree layout configuration.
//!
//! Describes how the repository tree is shaped: where ancestor walks stop,
//! which node types are leaf resources (assets) and containers (folders),
//! and where a leaf resource keeps its metadata record.

use crate::error::{RestrictionError, Result};
use serde::{Deserialize, Serialize};

/// Layout of the repository tree consumed by the matchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Boundary path for ancestor walks.
    #[serde(default = "default_repository_root")]
    pub repository_root: String,

    /// Type marker of leaf resources.
    #[serde(default = "default_leaf_type")]
    pub leaf_type: String,

    /// Type markers of containers.
    #[serde(default = "default_container_types")]
    pub container_types: Vec<String>,

    /// Name of the content child under a leaf resource.
    #[serde(default = "default_content_child")]
    pub content_child: String,

    /// Name of the metadata child under the content child.
    #[serde(default = "default_metadata_child")]
    pub metadata_child: String,

    /// chrono format string for date values.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_repository_root() -> String {
    "/content/dam".to_string()
}

fn default_leaf_type() -> String {
    "dam:Asset".to_string()
}

fn default_container_types() -> Vec<String> {
    vec![
        "nt:folder".to_string(),
        "sling:Folder".to_string(),
        "sling:OrderedFolder".to_string(),
    ]
}

fn default_content_child() -> String {
    "jcr:content".to_string()
}

fn default_metadata_child() -> String {
    "metadata".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%dT%H:%M:%S%.f%:z".to_string()
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            repository_root: default_repository_root(),
            leaf_type: default_leaf_type(),
            container_types: default_container_types(),
            content_child: default_content_child(),
            metadata_child: default_metadata_child(),
            date_format: default_date_format(),
        }
    }
}

impl TreeConfig {
    /// Sets the repository root.
    pub fn with_repository_root(mut self, root: impl Into<String>) -> Self {
        self.repository_root = root.into();
        self
    }

    /// Sets the leaf resource type.
    pub fn with_leaf_type(mut self, leaf_type: impl Into<String>) -> Self {
        self.leaf_type = leaf_type.into();
        self
    }

    /// Adds a container type.
    pub fn with_container_type(mut self, container_type: impl Into<String>) -> Self {
        self.container_types.push(container_type.into());
        self
    }

    /// Sets the date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: TreeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TreeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| RestrictionError::SerializationError(e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.repository_root.starts_with('/') {
            return Err(RestrictionError::ConfigError(format!(
                "repository_root must be an absolute path, got '{}'",
                self.repository_root
            )));
        }

        if self.leaf_type.is_empty() {
            return Err(RestrictionError::ConfigError("leaf_type is required".to_string()));
        }

        if self.container_types.iter().all(|t| t.is_empty()) {
            return Err(RestrictionError::ConfigError(
                "at least one container type is required".to_string(),
            ));
        }

        if self.content_child.is_empty() || self.metadata_child.is_empty() {
            return Err(RestrictionError::ConfigError(
                "content_child and metadata_child are required".to_string(),
            ));
        }

        Ok(())
    }
}
