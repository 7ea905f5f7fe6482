use serde::Serialize;
use uuid::Uuid;

use crate::models::roles::ADMIN_ROLE;

/// The authenticated identity a workflow runs on behalf of.
///
/// Built per request by [`crate::auth::middleware::AuthenticatedUser`] and passed
/// explicitly into every service call.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role_id: Uuid,
    pub role: String,
    /// Session the CSRF token is bound to.
    #[serde(skip)]
    pub session_id: String,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
