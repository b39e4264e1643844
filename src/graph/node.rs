//! Registry entry for a role in the shared graph

use serde::Serialize;

use crate::role::Role;

/// A role record whose sub-roles are id references into a [`RoleGraph`](super::RoleGraph)
///
/// ## Fields
///
/// - `id`: Registry key
/// - `name`, `description`: Display metadata
/// - `sub_roles`: Direct sub-role ids in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleNode {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "roles")]
    pub(crate) sub_roles: Vec<String>,
}

impl RoleNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            sub_roles: Vec::new(),
        }
    }

    /// Direct sub-role ids in insertion order
    pub fn sub_roles(&self) -> &[String] {
        &self.sub_roles
    }

    pub fn has_sub_role(&self, id: &str) -> bool {
        self.sub_roles.iter().any(|s| s == id)
    }

    /// Childless nested value carrying this node's metadata
    pub(crate) fn to_role(&self) -> Role {
        Role::new(self.id.clone(), self.name.clone(), self.description.clone())
    }
}

impl From<&Role> for RoleNode {
    fn from(role: &Role) -> Self {
        RoleNode::new(role.id.clone(), role.name.clone(), role.description.clone())
    }
}
