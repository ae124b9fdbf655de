mod common;

use common::init_tracing;
use restriction_engine::prelude::*;
use restriction_engine::sub_folder::{descent_level, is_required_level, NOT_A_DESCENDANT};

const PUBLIC: &str = "/content/dam/public";
const PARENT1: &str = "/content/dam/public/parent1";
const PARENT2: &str = "/content/dam/public/parent1/parent2";
const PHOTO: &str = "/content/dam/public/parent1/parent2/photo.jpg";

fn tree() -> MemoryTree {
    init_tracing();
    let mut tree = MemoryTree::new();
    tree.set_type(PUBLIC, "sling:Folder")
        .set_type(PARENT1, "sling:Folder")
        .set_type(PARENT2, "sling:Folder")
        .set_type(PHOTO, "dam:Asset")
        .add_path("/content/assets/images/logo.png");
    tree
}

fn depth(encoded: &str) -> SubFolderPattern {
    SubFolderPattern::new(encoded, PUBLIC).unwrap()
}

#[test]
fn test_descent_levels() {
    assert_eq!(descent_level(PUBLIC, "/content/dam/public/photo.jpg"), 1);
    assert_eq!(descent_level(PUBLIC, PHOTO), 3);
    assert_eq!(descent_level(PUBLIC, PUBLIC), 0);
    assert_eq!(
        descent_level("/content/dam", "/content/assets/images/logo.png"),
        NOT_A_DESCENDANT
    );
}

#[test]
fn test_required_level_is_false_without_node_or_anchor() {
    let tree = tree();
    let node = tree.node(PARENT1).unwrap();

    assert!(!is_required_level(None, 1, Some(&node), Operator::Equals));
    assert!(!is_required_level::<MemoryNode<'_>>(Some(PUBLIC), 1, None, Operator::Equals));
}

#[test]
fn test_only_first_two_levels_visible() {
    let tree = tree();
    let pattern = depth("allow#<=2");

    assert!(!pattern.matches_node(&tree.node(PUBLIC).unwrap()));
    assert!(pattern.matches_node(&tree.node(PARENT1).unwrap()));
    assert!(pattern.matches_node(&tree.node(PARENT2).unwrap()));
    assert!(!pattern.matches_node(&tree.node(PHOTO).unwrap()));
}

#[test]
fn test_deny_below_second_level() {
    let tree = tree();
    let pattern = depth("deny#>2");

    assert!(!pattern.matches_node(&tree.node(PARENT2).unwrap()));
    assert!(pattern.matches_node(&tree.node(PHOTO).unwrap()));
    assert!(!pattern.matches_node(&tree.node("/content/assets/images/logo.png").unwrap()));
}

#[test]
fn test_negation_only_applies_to_deny() {
    let tree = tree();
    let parent2 = tree.node(PARENT2).unwrap();
    let logo = tree.node("/content/assets/images/logo.png").unwrap();

    assert!(depth("deny#==2").matches_node(&parent2));
    assert!(!depth("deny#!==2").matches_node(&parent2));
    // Outside the anchor the level check fails, so the negated deny holds
    assert!(depth("deny#!==2").matches_node(&logo));

    assert!(depth("allow#!==2").matches_node(&parent2));
    assert!(!depth("allow#!==2").matches_node(&logo));
}

#[test]
fn test_encodings_agree() {
    let tree = tree();
    for (compact, legacy) in [
        ("deny#>=2", "deny_GREATER_THAN_EQUALS_2"),
        ("deny#<=2", "deny_LESS_THAN_EQUALS_2"),
        ("deny#==2", "deny_EQUALS_2"),
        ("deny#>2", "deny_GREATER_THEN_2"),
        ("deny#<2", "deny_LESS_THEN_2"),
    ] {
        assert_eq!(depth(compact), depth(legacy));
        assert_eq!(depth(legacy).rule().to_string(), compact);
        for path in [PUBLIC, PARENT1, PARENT2, PHOTO] {
            let node = tree.node(path).unwrap();
            assert_eq!(
                depth(compact).matches_node(&node),
                depth(&format!("v1:{}", legacy)).matches_node(&node),
                "{} at {}",
                compact,
                path
            );
        }
    }
}

#[test]
fn test_malformed_depth_rules() {
    assert!(matches!(
        SubFolderPattern::new("deny#>=two", PUBLIC),
        Err(RestrictionError::InvalidLevel(_))
    ));
    assert!(matches!(
        SubFolderPattern::new("deny#>=-1", PUBLIC),
        Err(RestrictionError::InvalidLevel(_))
    ));
    assert!(matches!(
        SubFolderPattern::new("deny#2", PUBLIC),
        Err(RestrictionError::InvalidRuleSyntax { .. })
    ));
    assert!(matches!(
        SubFolderPattern::new("v7:deny#>=2", PUBLIC),
        Err(RestrictionError::UnsupportedEncoding(_))
    ));
}
