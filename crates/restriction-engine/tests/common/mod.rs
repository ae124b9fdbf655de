//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use restriction_engine::node::PropertyValue;
use restriction_engine::MemoryTree;

pub const DENY_PATH: &str = "/content/dam/aapm-test/test-deny";
pub const ALLOW_PATH: &str = "/content/dam/aapm-test/test-allow";

pub const ASSET_TYPE: &str = "dam:Asset";
pub const ASSET_CONTENT_TYPE: &str = "dam:AssetContent";
pub const FOLDER_TYPE: &str = "nt:folder";
pub const FILE_TYPE: &str = "nt:file";

/// Routes engine logs to the test harness; set `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn metadata_path(node: &str) -> String {
    format!("{}/jcr:content/metadata", node)
}

/// Adds an asset at `path` whose metadata holds `property`.
pub fn add_asset(
    tree: &mut MemoryTree,
    path: &str,
    property: &str,
    value: impl Into<PropertyValue>,
) {
    tree.set_type(path, ASSET_TYPE)
        .set_type(&format!("{}/jcr:content", path), ASSET_CONTENT_TYPE)
        .set_property(&metadata_path(path), property, value);
}

/// Adds a thumbnail rendition under the asset at `asset`, inside a
/// `renditions` container of type `renditions_type`. Returns its path.
pub fn add_rendition(tree: &mut MemoryTree, asset: &str, renditions_type: &str) -> String {
    let renditions = format!("{}/jcr:content/renditions", asset);
    let rendition = format!("{}/cq5dam.thumbnail.140.100.png", renditions);
    tree.set_type(&renditions, renditions_type)
        .set_type(&rendition, FILE_TYPE);
    rendition
}

/// A tree whose deny node carries a metadata record with `property`.
pub fn deny_tree(property: &str, value: impl Into<PropertyValue>) -> MemoryTree {
    let mut tree = MemoryTree::new();
    tree.set_property(&metadata_path(DENY_PATH), property, value);
    tree
}
