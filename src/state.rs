use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::auth::Actor;
use crate::auth::authorization::PermissionRegistry;
use crate::auth::csrf::CsrfGuard;
use crate::config::AppConfig;
use crate::error::{CrmError, CrmResult};
use crate::models::permissions::{Action, Module, PermissionKey};

/// Everything a workflow needs besides its input: the store, the permission
/// registry, the CSRF guard and configuration.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub permissions: PermissionRegistry,
    pub csrf: CsrfGuard,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db,
            permissions: PermissionRegistry::new(config.permission_cache_ttl),
            csrf: CsrfGuard::new(config.csrf_token_ttl),
            config: Arc::new(config),
        }
    }

    /// Fails with [`CrmError::Forbidden`] unless the actor holds `<action>_<module>`.
    pub async fn authorize(&self, actor: &Actor, module: Module, action: Action) -> CrmResult<()> {
        let key = PermissionKey::new(module, action);
        if self.permissions.authorize(&self.db, actor, key).await? {
            Ok(())
        } else {
            tracing::warn!(actor = %actor.id, role = %actor.role, "Denied {key}");
            Err(CrmError::Forbidden)
        }
    }

    /// Authorization first, then the CSRF token. Used by every state-changing workflow.
    pub async fn authorize_mutation(
        &self,
        actor: &Actor,
        module: Module,
        action: Action,
        csrf_token: &str,
    ) -> CrmResult<()> {
        self.authorize(actor, module, action).await?;
        self.csrf.verify(&actor.session_id, csrf_token).await
    }
}
