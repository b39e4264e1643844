//! Depth-bounded effective-role flattening for nested roles

use tracing::{debug, warn};

use super::types::Role;
use crate::error::{Result, RoleError};

/// Deepest sub-role level [`Role::effective_roles`] will descend to
///
/// The root sits at depth 0, so a successful flattening holds at most
/// `MAX_DEPTH + 1` levels.
pub const MAX_DEPTH: usize = 10;

impl Role {
    /// Flattens this role and all transitively embedded sub-roles
    ///
    /// Pre-order: the role itself, then each sub-role's own effective roles
    /// in insertion order. Roles reachable through several parents appear
    /// once per path.
    ///
    /// # Errors
    ///
    /// [`RoleError::MaxDepthExceeded`] when a sub-role sits deeper than
    /// [`MAX_DEPTH`]. The first failure stops the traversal and no partial
    /// result is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use authz_roles::Role;
    ///
    /// let a = Role::new("a", "A", "")
    ///     .with_sub_roles(vec![Role::new("x", "X", "")])
    ///     .unwrap();
    /// let root = Role::new("root", "Root", "")
    ///     .with_sub_roles(vec![a, Role::new("b", "B", "")])
    ///     .unwrap();
    ///
    /// let ids: Vec<&str> = root.effective_role_ids().unwrap();
    /// assert_eq!(ids, vec!["root", "a", "x", "b"]);
    /// ```
    pub fn effective_roles(&self) -> Result<Vec<&Role>> {
        let mut collected = Vec::new();

        match collect(self, 0, &mut collected) {
            Ok(()) => {
                debug!(role = %self.id, count = collected.len(), "resolved effective roles");
                Ok(collected)
            }
            Err(err) => {
                warn!(role = %self.id, error = %err, "effective role resolution failed");
                Err(err)
            }
        }
    }

    /// Same as [`Role::effective_roles`], returning ids only
    pub fn effective_role_ids(&self) -> Result<Vec<&str>> {
        Ok(self
            .effective_roles()?
            .into_iter()
            .map(|r| r.id.as_str())
            .collect())
    }

    /// Checks whether `id` is granted by this role, directly or transitively
    pub fn grants(&self, id: &str) -> Result<bool> {
        Ok(self.effective_roles()?.iter().any(|r| r.id == id))
    }
}

fn collect<'a>(role: &'a Role, depth: usize, out: &mut Vec<&'a Role>) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(RoleError::MaxDepthExceeded {
            role: role.id.clone(),
            max_depth: MAX_DEPTH,
        });
    }

    out.push(role);
    for sub in role.sub_roles() {
        collect(sub, depth + 1, out)?;
    }

    Ok(())
}
