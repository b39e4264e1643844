//! Role storage contract
//!
//! Consuming systems persist and look up roles through [`RoleStore`]; the
//! composition and flattening logic never calls it.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::role::Role;

pub mod memory;
pub mod pattern;

pub use memory::InMemoryRoleStore;
pub use pattern::matches_pattern;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Role store trait
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Store a new role; `Conflict` if the id is taken
    async fn create(&self, role: Role) -> StoreResult<()>;

    /// Replace the role with the same id; `NotFound` if absent
    async fn update(&self, role: Role) -> StoreResult<()>;

    /// Get a role by id
    async fn get(&self, id: &str) -> StoreResult<Role>;

    /// Get the first role with the given name
    async fn get_by_name(&self, name: &str) -> StoreResult<Role>;

    /// Delete a role by id; `NotFound` if absent
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// List roles in store order, skipping `offset` and returning at most `limit`
    async fn list(&self, limit: usize, offset: usize) -> StoreResult<Vec<Role>>;

    /// Find roles whose id or name matches `pattern` (see [`matches_pattern`])
    async fn find_matching(&self, pattern: &str) -> StoreResult<Vec<Role>>;
}
