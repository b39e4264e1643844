//! Core role value type

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::flatten::MAX_DEPTH;
use crate::error::{Result, RoleError};

/// A named bundle of granted capability that may embed other roles
///
/// Sub-roles keep their insertion order, which is the order used by
/// [`Role::effective_roles`] and by serialization.
///
/// ## Serialized shape
///
/// ```json
/// {"id": "admin", "name": "Admin", "description": "", "roles": [ ... ]}
/// ```
///
/// `"roles": null` is read as an empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    /// Caller-assigned, stable identifier
    pub id: String,

    /// Display name (not unique)
    pub name: String,

    /// Free-form description
    pub description: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    roles: Vec<Role>,
}

impl Role {
    /// Creates a role with no sub-roles
    ///
    /// # Examples
    ///
    /// ```rust
    /// use authz_roles::Role;
    ///
    /// let role = Role::new("auditor", "Auditor", "Reads audit logs");
    /// assert!(role.sub_roles().is_empty());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            roles: Vec::new(),
        }
    }

    /// Seeds the sub-role list, applying the same checks as [`Role::add_sub_role`]
    ///
    /// Fails on the first rejected sub-role.
    pub fn with_sub_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Result<Self> {
        for role in roles {
            self.add_sub_role(role)?;
        }
        Ok(self)
    }

    /// Appends a direct sub-role
    ///
    /// # Errors
    ///
    /// - [`RoleError::SelfReference`] if `role.id` equals this role's id
    /// - [`RoleError::DuplicateChild`] if a direct sub-role already has `role.id`
    ///
    /// Only direct children are checked. A role already present deeper in the
    /// hierarchy is accepted. On error the sub-role list is left untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use authz_roles::{Role, RoleError};
    ///
    /// let mut admin = Role::new("admin", "Admin", "");
    /// admin.add_sub_role(Role::new("viewer", "Viewer", "")).unwrap();
    ///
    /// let err = admin.add_sub_role(Role::new("viewer", "Other", "")).unwrap_err();
    /// assert!(matches!(err, RoleError::DuplicateChild { .. }));
    /// ```
    pub fn add_sub_role(&mut self, role: Role) -> Result<()> {
        if role.id == self.id {
            return Err(RoleError::SelfReference { role: role.id });
        }

        if self.has_sub_role(&role.id) {
            return Err(RoleError::DuplicateChild {
                parent: self.id.clone(),
                child: role.id,
            });
        }

        debug!(parent = %self.id, child = %role.id, "added sub role");
        self.roles.push(role);

        Ok(())
    }

    /// Direct sub-roles in insertion order
    pub fn sub_roles(&self) -> &[Role] {
        &self.roles
    }

    /// Checks whether a direct sub-role has the given id
    pub fn has_sub_role(&self, id: &str) -> bool {
        self.roles.iter().any(|r| r.id == id)
    }

    /// Re-checks the composition invariants across the whole hierarchy
    ///
    /// Values built through [`Role::add_sub_role`] always pass. Values
    /// deserialized from external input may not.
    pub fn validate(&self) -> Result<()> {
        validate_at(self, 0)
    }
}

fn validate_at(role: &Role, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(RoleError::MaxDepthExceeded {
            role: role.id.clone(),
            max_depth: MAX_DEPTH,
        });
    }

    for (i, sub) in role.roles.iter().enumerate() {
        if sub.id == role.id {
            return Err(RoleError::SelfReference { role: sub.id.clone() });
        }
        if role.roles[..i].iter().any(|prev| prev.id == sub.id) {
            return Err(RoleError::DuplicateChild {
                parent: role.id.clone(),
                child: sub.id.clone(),
            });
        }
        validate_at(sub, depth + 1)?;
    }

    Ok(())
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Role>>::deserialize(deserializer)?.unwrap_or_default())
}
