//! WASM bindings for restriction patterns.

#![cfg(feature = "wasm")]

use crate::config::TreeConfig;
use crate::node::MemoryTree;
use crate::pattern::{Pattern, RestrictionPattern};
use crate::provider::{pattern_for_restriction, Restriction};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible wrapper around one decoded restriction.
#[wasm_bindgen]
pub struct WasmRestriction {
    pattern: Pattern,
}

#[wasm_bindgen]
impl WasmRestriction {
    /// Decodes `encoded` for restriction `name` declared at `anchor_path`,
    /// using the default tree layout.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, encoded: &str, anchor_path: &str) -> Result<WasmRestriction, JsValue> {
        Self::build(name, encoded, anchor_path, TreeConfig::default())
    }

    /// Same as the constructor, with the tree layout given as YAML.
    #[wasm_bindgen]
    pub fn with_config_yaml(
        name: &str,
        encoded: &str,
        anchor_path: &str,
        config_yaml: &str,
    ) -> Result<WasmRestriction, JsValue> {
        let config = TreeConfig::from_yaml(config_yaml).map_err(to_js)?;
        Self::build(name, encoded, anchor_path, config)
    }

    /// Evaluates the restriction on the node at `path` of a JSON tree snapshot.
    #[wasm_bindgen]
    pub fn matches(&self, tree_json: &str, path: &str) -> Result<bool, JsValue> {
        let tree = MemoryTree::from_json(tree_json).map_err(to_js)?;
        let node = tree
            .node(path)
            .ok_or_else(|| JsValue::from_str(&format!("No node at {}", path)))?;
        Ok(self.pattern.matches_node(&node))
    }

    /// Returns true if the restriction was empty or unknown.
    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl WasmRestriction {
    fn build(
        name: &str,
        encoded: &str,
        anchor_path: &str,
        config: TreeConfig,
    ) -> Result<WasmRestriction, JsValue> {
        let restriction = Restriction::new(name, encoded);
        let pattern = pattern_for_restriction(Some(anchor_path), &restriction, Arc::new(config))
            .map_err(to_js)?;
        Ok(Self { pattern })
    }
}

/// Logs a message to the console (for debugging).
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Returns the version of the restriction engine.
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}
