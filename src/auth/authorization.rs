use moka::future::Cache;
use sea_orm::{DatabaseConnection, DbErr};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::Actor;
use crate::db::permissions as permission_db;
use crate::models::permissions::PermissionKey;

/// Answers "may this actor do X".
///
/// The `admin` role passes every check without a lookup. Other roles are
/// resolved to their granted keys, cached per role name.
#[derive(Clone)]
pub struct PermissionRegistry {
    granted: Cache<String, Arc<HashSet<String>>>,
}

impl PermissionRegistry {
    pub fn new(ttl: Duration) -> Self {
        let granted = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(256)
            .build();

        Self { granted }
    }

    pub async fn authorize(
        &self,
        db: &DatabaseConnection,
        actor: &Actor,
        key: PermissionKey,
    ) -> Result<bool, DbErr> {
        if actor.is_admin() {
            return Ok(true);
        }

        let granted = self.granted_for_role(db, &actor.role).await?;
        Ok(granted.contains(&key.to_string()))
    }

    async fn granted_for_role(
        &self,
        db: &DatabaseConnection,
        role: &str,
    ) -> Result<Arc<HashSet<String>>, DbErr> {
        if let Some(cached) = self.granted.get(role).await {
            return Ok(cached);
        }

        let keys: HashSet<String> = permission_db::get_permission_names_for_role(db, role)
            .await?
            .into_iter()
            .collect();
        let keys = Arc::new(keys);
        self.granted.insert(role.to_string(), keys.clone()).await;

        Ok(keys)
    }

    /// Drop the cached grant set after a role's permissions or name change.
    pub async fn invalidate(&self, role: &str) {
        self.granted.invalidate(role).await;
    }
}
