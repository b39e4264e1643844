//! Shared role registry with id-referenced composition
//!
//! Roles are stored once and linked by id, so a role embedded under several
//! parents is a single node. Traversals resolve edges on demand and are
//! guarded by a depth bound and, optionally, path-based cycle detection.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::config::TraversalConfig;
use super::node::RoleNode;
use crate::error::{Result, RoleError};
use crate::role::Role;

/// Registry of roles addressed by id
///
/// # Examples
///
/// ```rust
/// use authz_roles::{RoleGraph, RoleError};
///
/// let mut graph = RoleGraph::new();
/// graph.register("admin", "Admin", "").unwrap();
/// graph.register("editor", "Editor", "").unwrap();
/// graph.add_sub_role("admin", "editor").unwrap();
/// graph.add_sub_role("editor", "admin").unwrap();
///
/// let err = graph.effective_roles("admin").unwrap_err();
/// assert!(matches!(err, RoleError::CycleDetected { .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    /// Map of role id to graph node
    nodes: HashMap<String, RoleNode>,

    /// Reverse adjacency (who embeds this role)
    reverse_deps: HashMap<String, HashSet<String>>,

    config: TraversalConfig,
}

impl RoleGraph {
    /// Creates an empty graph with the default traversal configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TraversalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Registers a childless role
    ///
    /// # Errors
    ///
    /// [`RoleError::AlreadyExists`] if `id` is already registered
    pub fn register(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        let node = RoleNode::new(id, name, description);
        if self.nodes.contains_key(&node.id) {
            return Err(RoleError::AlreadyExists { role: node.id });
        }

        self.reverse_deps.insert(node.id.clone(), HashSet::new());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Replaces a role's display metadata, keeping its edges
    pub fn update_metadata(
        &mut self,
        id: &str,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or_else(|| RoleError::RoleNotFound {
            role: id.to_string(),
        })?;
        node.name = name.into();
        node.description = description.into();
        Ok(())
    }

    /// Links `child_id` as the last direct sub-role of `parent_id`
    ///
    /// Same shallow checks as [`Role::add_sub_role`]; a child already
    /// reachable through other roles is accepted, even if the new edge closes
    /// a cycle.
    ///
    /// # Errors
    ///
    /// - [`RoleError::RoleNotFound`] if either id is unregistered
    /// - [`RoleError::SelfReference`] if the ids are equal
    /// - [`RoleError::DuplicateChild`] if the edge already exists
    pub fn add_sub_role(&mut self, parent_id: &str, child_id: &str) -> Result<()> {
        if !self.nodes.contains_key(child_id) {
            return Err(RoleError::RoleNotFound {
                role: child_id.to_string(),
            });
        }

        let parent = self
            .nodes
            .get_mut(parent_id)
            .ok_or_else(|| RoleError::RoleNotFound {
                role: parent_id.to_string(),
            })?;

        if parent_id == child_id {
            return Err(RoleError::SelfReference {
                role: child_id.to_string(),
            });
        }

        if parent.has_sub_role(child_id) {
            return Err(RoleError::DuplicateChild {
                parent: parent_id.to_string(),
                child: child_id.to_string(),
            });
        }

        parent.sub_roles.push(child_id.to_string());
        self.reverse_deps
            .entry(child_id.to_string())
            .or_default()
            .insert(parent_id.to_string());

        debug!(parent = %parent_id, child = %child_id, "linked sub role");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&RoleNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Roles that list `id` as a direct sub-role
    pub fn parents_of(&self, id: &str) -> HashSet<String> {
        self.reverse_deps.get(id).cloned().unwrap_or_default()
    }

    /// All registered role ids, sorted
    pub fn role_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Flattens the role `id` and every role reachable from it
    ///
    /// Pre-order, children in insertion order. A role reachable through
    /// several parents appears once per path.
    ///
    /// # Errors
    ///
    /// - [`RoleError::RoleNotFound`] for an unknown id, or a dangling edge
    /// - [`RoleError::CycleDetected`] when a role reappears on the current
    ///   path (only with `detect_cycles`)
    /// - [`RoleError::MaxDepthExceeded`] past `max_depth`
    ///
    /// The first failure aborts the traversal; no partial set is returned.
    pub fn effective_roles(&self, id: &str) -> Result<Vec<&RoleNode>> {
        let mut collected = Vec::new();
        let mut path = Vec::new();

        match self.collect(id, 0, &mut path, &mut collected) {
            Ok(()) => {
                debug!(role = %id, count = collected.len(), "resolved effective roles");
                Ok(collected)
            }
            Err(err) => {
                warn!(role = %id, error = %err, "effective role resolution failed");
                Err(err)
            }
        }
    }

    pub fn effective_role_ids(&self, id: &str) -> Result<Vec<String>> {
        Ok(self
            .effective_roles(id)?
            .into_iter()
            .map(|n| n.id.clone())
            .collect())
    }

    /// Checks whether `target` is granted by `id`, directly or transitively
    pub fn grants(&self, id: &str, target: &str) -> Result<bool> {
        Ok(self.effective_roles(id)?.iter().any(|n| n.id == target))
    }

    /// Registers every role of a nested value and links them by id
    ///
    /// Ids already present keep their metadata; existing edges are kept and
    /// not duplicated. The import is all-or-nothing.
    pub fn import(&mut self, role: &Role) -> Result<()> {
        let mut staged = self.clone();
        staged.import_at(role, 0)?;
        *self = staged;

        debug!(role = %role.id, "imported role hierarchy");
        Ok(())
    }

    /// Rebuilds the nested value for `id`
    ///
    /// Fails under the same conditions as [`RoleGraph::effective_roles`].
    pub fn materialize(&self, id: &str) -> Result<Role> {
        let mut path = Vec::new();
        self.build(id, 0, &mut path)
    }

    fn enter(&self, id: &str, depth: usize, path: &mut Vec<String>) -> Result<&RoleNode> {
        if self.config.detect_cycles {
            if let Some(start) = path.iter().position(|p| p == id) {
                let mut cycle = path[start..].to_vec();
                cycle.push(id.to_string());
                return Err(RoleError::CycleDetected { cycle });
            }
        }

        if depth > self.config.max_depth {
            return Err(RoleError::MaxDepthExceeded {
                role: id.to_string(),
                max_depth: self.config.max_depth,
            });
        }

        let node = self.nodes.get(id).ok_or_else(|| RoleError::RoleNotFound {
            role: id.to_string(),
        })?;
        path.push(id.to_string());
        Ok(node)
    }

    fn collect<'a>(
        &'a self,
        id: &str,
        depth: usize,
        path: &mut Vec<String>,
        out: &mut Vec<&'a RoleNode>,
    ) -> Result<()> {
        let node = self.enter(id, depth, path)?;

        out.push(node);
        for child in &node.sub_roles {
            self.collect(child, depth + 1, path, out)?;
        }

        path.pop();
        Ok(())
    }

    fn build(&self, id: &str, depth: usize, path: &mut Vec<String>) -> Result<Role> {
        let node = self.enter(id, depth, path)?;

        let mut role = node.to_role();
        for child in &node.sub_roles {
            role.add_sub_role(self.build(child, depth + 1, path)?)?;
        }

        path.pop();
        Ok(role)
    }

    fn import_at(&mut self, role: &Role, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(RoleError::MaxDepthExceeded {
                role: role.id.clone(),
                max_depth: self.config.max_depth,
            });
        }

        if !self.nodes.contains_key(&role.id) {
            self.register(role.id.clone(), role.name.clone(), role.description.clone())?;
        }

        for sub in role.sub_roles() {
            self.import_at(sub, depth + 1)?;

            let already_linked = self
                .nodes
                .get(&role.id)
                .is_some_and(|n| n.has_sub_role(&sub.id));
            if !already_linked {
                self.add_sub_role(&role.id, &sub.id)?;
            }
        }

        Ok(())
    }
}
