//! In-memory role store

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::info;

use super::pattern::matches_pattern;
use super::{RoleStore, StoreResult};
use crate::error::StoreError;
use crate::role::Role;

/// In-memory role store, ordered by creation
///
/// Cloning yields another handle to the same roles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleStore {
    roles: Arc<RwLock<IndexMap<String, Role>>>,
}

impl InMemoryRoleStore {
    /// Create an empty in-memory role store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.roles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.roles.read().await.is_empty()
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn create(&self, role: Role) -> StoreResult<()> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(&role.id) {
            return Err(StoreError::Conflict(role.id));
        }

        info!(role = %role.id, "creating role");
        roles.insert(role.id.clone(), role);
        Ok(())
    }

    async fn update(&self, role: Role) -> StoreResult<()> {
        let mut roles = self.roles.write().await;
        let Some(existing) = roles.get_mut(&role.id) else {
            return Err(StoreError::NotFound(role.id));
        };

        info!(role = %role.id, "updating role");
        *existing = role;
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Role> {
        let roles = self.roles.read().await;
        roles
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn get_by_name(&self, name: &str) -> StoreResult<Role> {
        let roles = self.roles.read().await;
        roles
            .values()
            .find(|r| r.name == name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut roles = self.roles.write().await;
        if roles.shift_remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        info!(role = %id, "deleted role");
        Ok(())
    }

    async fn list(&self, limit: usize, offset: usize) -> StoreResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.values().skip(offset).take(limit).cloned().collect())
    }

    async fn find_matching(&self, pattern: &str) -> StoreResult<Vec<Role>> {
        let roles = self.roles.read().await;
        Ok(roles
            .values()
            .filter(|r| matches_pattern(&r.id, pattern) || matches_pattern(&r.name, pattern))
            .cloned()
            .collect())
    }
}
