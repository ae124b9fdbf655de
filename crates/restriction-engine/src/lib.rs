//! Restriction Engine
//!
//! Fine-grained access control restrictions for hierarchical asset
//! repositories, compiled to both WASM and native.
//!
//! Two restriction kinds are supported, each stored on an access control
//! entry as a single encoded string:
//!
//! - `rep:hasPropertyValues`: grants or denies based on the metadata of
//!   assets, e.g. `deny#string$cq:tags==confidential`.
//! - `rep:subFolder`: grants or denies based on how deep a node sits below
//!   the entry's path, e.g. `allow#<=2`.
//!
//! Providers decode the stored strings into [`Pattern`]s which are then
//! evaluated against any tree implementing [`TreeNode`].

pub mod classifier;
pub mod comparator;
pub mod config;
pub mod error;
pub mod navigator;
pub mod node;
pub mod parser;
pub mod pattern;
pub mod property_values;
pub mod provider;
pub mod rule;
pub mod sub_folder;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::TreeConfig;
pub use error::{RestrictionError, Result};
pub use node::{MemoryNode, MemoryTree, TreeNode};
pub use pattern::{Pattern, RestrictionPattern};
pub use property_values::HasPropertyValuesPattern;
pub use provider::{
    PropertyValueRestrictionProvider, Restriction, RestrictionProvider, SubFolderRestrictionProvider,
};
pub use rule::{DepthRule, PropertyRule};
pub use sub_folder::SubFolderPattern;

/// Version of the restriction engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::config::TreeConfig;
    pub use crate::error::{RestrictionError, Result};
    pub use crate::node::{MemoryNode, MemoryTree, TreeNode};
    pub use crate::pattern::{Pattern, RestrictionPattern};
    pub use crate::property_values::HasPropertyValuesPattern;
    pub use crate::provider::{
        PropertyValueRestrictionProvider, Restriction, RestrictionProvider,
        SubFolderRestrictionProvider,
    };
    pub use crate::rule::{DepthRule, PropertyRule};
    pub use crate::sub_folder::SubFolderPattern;
    pub use crate::types::*;
}
