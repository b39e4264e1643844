//! # Role Hierarchies (authz-roles)
//!
//! Composable roles for access-control systems:
//! - Roles that embed other roles as ordered sub-roles
//! - Effective-role flattening with a fixed recursion bound
//! - Shared role graph addressed by id, with cycle detection
//! - Async storage contract with an in-memory implementation
//!
//! ## Example
//!
//! ```rust
//! use authz_roles::Role;
//!
//! let mut admin = Role::new("admin", "Administrator", "Full access");
//! let mut editor = Role::new("editor", "Editor", "Edit documents");
//! editor.add_sub_role(Role::new("viewer", "Viewer", "Read documents")).unwrap();
//! admin.add_sub_role(editor).unwrap();
//!
//! let ids: Vec<&str> = admin
//!     .effective_roles()
//!     .unwrap()
//!     .into_iter()
//!     .map(|r| r.id.as_str())
//!     .collect();
//! assert_eq!(ids, vec!["admin", "editor", "viewer"]);
//! ```

pub mod error;
pub mod graph;
pub mod role;
pub mod store;

pub use error::{Result, RoleError, StoreError};
pub use graph::{RoleGraph, RoleNode, TraversalConfig};
pub use role::{Role, MAX_DEPTH};
pub use store::{InMemoryRoleStore, RoleStore};
