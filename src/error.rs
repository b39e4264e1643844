//! Error types for role composition, traversal and storage

use thiserror::Error;

/// Result type alias for role operations
pub type Result<T> = std::result::Result<T, RoleError>;

/// Errors raised while composing or traversing roles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleError {
    /// A role was added as its own sub-role
    #[error("sub role id '{role}' cannot match parent")]
    SelfReference { role: String },

    /// A sub-role with the same id is already a direct child
    #[error("role '{parent}' already contains role '{child}'")]
    DuplicateChild { parent: String, child: String },

    /// Traversal went deeper than the configured bound
    #[error("maximum recursion depth {max_depth} exceeded at role '{role}'")]
    MaxDepthExceeded { role: String, max_depth: usize },

    /// A role was reached again while still on the traversal path
    #[error("circular dependency detected: {}", .cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    /// Role id is not registered
    #[error("role '{role}' not found")]
    RoleNotFound { role: String },

    /// Role id is already registered
    #[error("role '{role}' already exists")]
    AlreadyExists { role: String },
}

/// Failures surfaced by a [`RoleStore`](crate::store::RoleStore) backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("role '{0}' not found")]
    NotFound(String),

    #[error("role '{0}' already exists")]
    Conflict(String),

    /// Opaque failure of the backing store (I/O, transport, serialization)
    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}
