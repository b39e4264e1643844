//! # Role Module
//!
//! Nested role values and their effective-role flattening:
//! - Ordered sub-role composition with shallow self/duplicate checks
//! - Pre-order flattening bounded by [`MAX_DEPTH`]
//! - Fail-closed: a failing branch aborts the whole flattening
//!
//! ## Example
//!
//! ```rust
//! use authz_roles::role::Role;
//!
//! let viewer = Role::new("viewer", "Viewer", "Read access");
//! let editor = Role::new("editor", "Editor", "Write access")
//!     .with_sub_roles(vec![viewer])
//!     .unwrap();
//!
//! assert_eq!(editor.effective_roles().unwrap().len(), 2);
//! ```

mod flatten;
mod types;

pub use flatten::MAX_DEPTH;
pub use types::Role;
