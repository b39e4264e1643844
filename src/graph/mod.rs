//! # Role Graph Module
//!
//! Shared role hierarchy addressed by id:
//! - Roles registered once, referenced by any number of parents
//! - Composition edges resolved on demand
//! - Path-based cycle detection plus a depth bound
//! - Conversion to and from nested [`Role`](crate::Role) values
//!
//! ## Example
//!
//! ```rust
//! use authz_roles::RoleGraph;
//!
//! let mut graph = RoleGraph::new();
//! for id in ["admin", "editor", "billing", "viewer"] {
//!     graph.register(id, id, "").unwrap();
//! }
//! graph.add_sub_role("admin", "editor").unwrap();
//! graph.add_sub_role("admin", "billing").unwrap();
//! graph.add_sub_role("editor", "viewer").unwrap();
//! graph.add_sub_role("billing", "viewer").unwrap();
//!
//! assert_eq!(
//!     graph.effective_role_ids("admin").unwrap(),
//!     vec!["admin", "editor", "viewer", "billing", "viewer"]
//! );
//! assert_eq!(graph.parents_of("viewer").len(), 2);
//! ```

mod config;
mod node;
mod registry;

pub use config::TraversalConfig;
pub use node::RoleNode;
pub use registry::RoleGraph;

#[cfg(test)]
mod tests;
