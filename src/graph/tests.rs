//! Tests for the shared role graph
//!
//! Tests cover:
//! - Registration and linking errors
//! - Shared sub-roles and the reverse index
//! - Cycle handling with and without path detection
//! - Import/materialize against nested roles

use test_case::test_case;

use super::{RoleGraph, TraversalConfig};
use crate::error::RoleError;
use crate::role::Role;

fn graph_with(ids: &[&str]) -> RoleGraph {
    let mut graph = RoleGraph::new();
    for id in ids {
        graph.register(*id, id.to_uppercase(), "").unwrap();
    }
    graph
}

/// Registers `role_0 -> ... -> role_{nested}` in `graph`
fn link_chain(graph: &mut RoleGraph, nested: usize) {
    for level in 0..=nested {
        graph.register(format!("role_{}", level), "chain", "").unwrap();
    }
    for level in 0..nested {
        graph
            .add_sub_role(&format!("role_{}", level), &format!("role_{}", level + 1))
            .unwrap();
    }
}

#[test]
fn test_new_graph() {
    let graph = RoleGraph::new();
    assert!(graph.is_empty());
    assert_eq!(graph.len(), 0);
    assert_eq!(graph.config(), &TraversalConfig::default());
}

#[test]
fn test_register_duplicate_id() {
    let mut graph = graph_with(&["admin"]);
    let result = graph.register("admin", "Other", "");

    assert_eq!(
        result,
        Err(RoleError::AlreadyExists { role: "admin".to_string() })
    );
    assert_eq!(graph.get("admin").unwrap().name, "ADMIN");
}

#[test]
fn test_update_metadata() {
    let mut graph = graph_with(&["admin", "viewer"]);
    graph.add_sub_role("admin", "viewer").unwrap();
    graph.update_metadata("admin", "Administrator", "All access").unwrap();

    let node = graph.get("admin").unwrap();
    assert_eq!(node.name, "Administrator");
    assert_eq!(node.description, "All access");
    assert_eq!(node.sub_roles(), &["viewer".to_string()]);

    assert!(matches!(
        graph.update_metadata("ghost", "", ""),
        Err(RoleError::RoleNotFound { .. })
    ));
}

#[test]
fn test_add_sub_role_unknown_ids() {
    let mut graph = graph_with(&["admin"]);

    assert_eq!(
        graph.add_sub_role("admin", "ghost"),
        Err(RoleError::RoleNotFound { role: "ghost".to_string() })
    );
    assert_eq!(
        graph.add_sub_role("ghost", "admin"),
        Err(RoleError::RoleNotFound { role: "ghost".to_string() })
    );
}

#[test]
fn test_add_sub_role_self_reference() {
    let mut graph = graph_with(&["admin"]);

    assert_eq!(
        graph.add_sub_role("admin", "admin"),
        Err(RoleError::SelfReference { role: "admin".to_string() })
    );
    assert!(graph.get("admin").unwrap().sub_roles().is_empty());
}

#[test]
fn test_add_sub_role_duplicate() {
    let mut graph = graph_with(&["admin", "viewer"]);
    graph.add_sub_role("admin", "viewer").unwrap();

    assert!(matches!(
        graph.add_sub_role("admin", "viewer"),
        Err(RoleError::DuplicateChild { .. })
    ));
    assert_eq!(graph.get("admin").unwrap().sub_roles().len(), 1);
}

#[test]
fn test_shared_sub_role_visible_through_every_parent() {
    let mut graph = graph_with(&["editor", "billing", "viewer"]);
    graph.add_sub_role("editor", "viewer").unwrap();
    graph.add_sub_role("billing", "viewer").unwrap();

    graph.update_metadata("viewer", "Reader", "").unwrap();

    for parent in ["editor", "billing"] {
        let effective = graph.effective_roles(parent).unwrap();
        assert_eq!(effective[1].name, "Reader");
    }

    let parents = graph.parents_of("viewer");
    assert!(parents.contains("editor"));
    assert!(parents.contains("billing"));
    assert!(graph.parents_of("editor").is_empty());
    assert!(graph.parents_of("ghost").is_empty());
}

#[test]
fn test_effective_roles_preorder() {
    let mut graph = graph_with(&["r", "a", "b", "x"]);
    graph.add_sub_role("r", "a").unwrap();
    graph.add_sub_role("r", "b").unwrap();
    graph.add_sub_role("a", "x").unwrap();

    assert_eq!(graph.effective_role_ids("r").unwrap(), vec!["r", "a", "x", "b"]);
    assert_eq!(graph.effective_role_ids("b").unwrap(), vec!["b"]);
}

#[test]
fn test_effective_roles_unknown_root() {
    let graph = RoleGraph::new();
    assert!(matches!(
        graph.effective_roles("ghost"),
        Err(RoleError::RoleNotFound { .. })
    ));
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let mut graph = graph_with(&["top", "left", "right", "bottom"]);
    graph.add_sub_role("top", "left").unwrap();
    graph.add_sub_role("top", "right").unwrap();
    graph.add_sub_role("left", "bottom").unwrap();
    graph.add_sub_role("right", "bottom").unwrap();

    assert_eq!(
        graph.effective_role_ids("top").unwrap(),
        vec!["top", "left", "bottom", "right", "bottom"]
    );
}

#[test_case(9 => Ok(10) ; "nine nested")]
#[test_case(10 => Ok(11) ; "at the bound")]
#[test_case(12 => Err(RoleError::MaxDepthExceeded { role: "role_11".to_string(), max_depth: 10 }) ; "twelve nested")]
fn chain_depth(nested: usize) -> Result<usize, RoleError> {
    let mut graph = RoleGraph::new();
    link_chain(&mut graph, nested);
    let resolved = graph.effective_roles("role_0").map(|roles| roles.len());
    resolved
}

#[test]
fn test_custom_max_depth() {
    let mut graph = RoleGraph::with_config(TraversalConfig::default().with_max_depth(2));
    link_chain(&mut graph, 3);

    assert_eq!(graph.effective_roles("role_1").unwrap().len(), 3);
    assert_eq!(
        graph.effective_roles("role_0"),
        Err(RoleError::MaxDepthExceeded { role: "role_3".to_string(), max_depth: 2 })
    );
}

#[test]
fn test_cycle_detected_on_path() {
    let mut graph = graph_with(&["x", "y", "z"]);
    graph.add_sub_role("x", "y").unwrap();
    graph.add_sub_role("y", "z").unwrap();
    // Shallow check allows closing the loop
    graph.add_sub_role("z", "x").unwrap();

    assert_eq!(
        graph.effective_roles("x"),
        Err(RoleError::CycleDetected {
            cycle: vec!["x".into(), "y".into(), "z".into(), "x".into()]
        })
    );
    assert_eq!(
        graph.effective_roles("y"),
        Err(RoleError::CycleDetected {
            cycle: vec!["y".into(), "z".into(), "x".into(), "y".into()]
        })
    );
}

#[test]
fn test_cycle_without_detection_hits_depth_bound() {
    let mut graph = RoleGraph::with_config(TraversalConfig::default().with_cycle_detection(false));
    for id in ["x", "y"] {
        graph.register(id, id, "").unwrap();
    }
    graph.add_sub_role("x", "y").unwrap();
    graph.add_sub_role("y", "x").unwrap();

    let result = graph.effective_roles("x");
    assert!(matches!(
        result,
        Err(RoleError::MaxDepthExceeded { max_depth: 10, .. })
    ));
    assert!(graph.grants("x", "y").is_err());
}

#[test]
fn test_cycle_in_later_branch_fails_whole_resolution() {
    let mut graph = graph_with(&["root", "ok", "loop_a", "loop_b"]);
    graph.add_sub_role("root", "ok").unwrap();
    graph.add_sub_role("root", "loop_a").unwrap();
    graph.add_sub_role("loop_a", "loop_b").unwrap();
    graph.add_sub_role("loop_b", "loop_a").unwrap();

    assert!(graph.effective_role_ids("root").is_err());
    assert!(graph.grants("root", "ok").is_err());
    // Unaffected subgraph still resolves
    assert!(graph.grants("ok", "ok").unwrap());
}

#[test]
fn test_import_and_materialize() {
    let a = Role::new("a", "A", "").with_sub_roles(vec![Role::new("x", "X", "")]).unwrap();
    let root = Role::new("r", "R", "root")
        .with_sub_roles(vec![a, Role::new("b", "B", "")])
        .unwrap();

    let mut graph = RoleGraph::new();
    graph.import(&root).unwrap();

    assert_eq!(graph.len(), 4);
    assert_eq!(graph.effective_role_ids("r").unwrap(), vec!["r", "a", "x", "b"]);
    assert_eq!(graph.materialize("r").unwrap(), root);
}

#[test]
fn test_import_merges_shared_roles() {
    let viewer = Role::new("viewer", "Viewer", "");
    let editor = Role::new("editor", "Editor", "")
        .with_sub_roles(vec![viewer.clone()])
        .unwrap();
    let billing = Role::new("billing", "Billing", "")
        .with_sub_roles(vec![viewer])
        .unwrap();

    let mut graph = RoleGraph::new();
    graph.import(&editor).unwrap();
    graph.import(&billing).unwrap();
    // Re-importing does not duplicate edges
    graph.import(&editor).unwrap();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.get("editor").unwrap().sub_roles().len(), 1);
    assert_eq!(graph.parents_of("viewer").len(), 2);
}

#[test]
fn test_import_is_atomic() {
    let mut deep = Role::new("role_11", "", "");
    for level in (0..11).rev() {
        deep = Role::new(format!("role_{}", level), "", "")
            .with_sub_roles(vec![deep])
            .unwrap();
    }

    let mut graph = graph_with(&["existing"]);
    let result = graph.import(&deep);

    assert!(matches!(result, Err(RoleError::MaxDepthExceeded { .. })));
    assert_eq!(graph.role_ids(), vec!["existing".to_string()]);
}

#[test]
fn test_materialize_cycle_fails() {
    let mut graph = graph_with(&["x", "y"]);
    graph.add_sub_role("x", "y").unwrap();
    graph.add_sub_role("y", "x").unwrap();

    assert!(matches!(
        graph.materialize("x"),
        Err(RoleError::CycleDetected { .. })
    ));
}

#[test]
fn test_role_ids_sorted() {
    let graph = graph_with(&["c", "a", "b"]);
    assert_eq!(graph.role_ids(), vec!["a", "b", "c"]);
    assert!(graph.contains("a"));
    assert!(!graph.contains("d"));
}
