//! Login and password handling. This is the session provider the workflows rely
//! on; workflows themselves never see credentials.

use serde::{Deserialize, Serialize};

use crate::auth::{Actor, jwt};
use crate::db::users as user_db;
use crate::error::{CrmError, CrmResult};
use crate::models::users::UserResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: usize,
    pub user: UserResponse,
}

/// bcrypt is CPU bound, so hashing runs on the blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> CrmResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| CrmError::operation_failed(format!("password hashing task: {e}")))?
        .map_err(CrmError::from)
}

async fn verify_password(password: &str, hash: &str) -> CrmResult<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| CrmError::operation_failed(format!("password check task: {e}")))?
        .map_err(CrmError::from)
}

/// Unknown email and wrong password produce the same error.
pub async fn login(state: &AppState, request: LoginRequest) -> CrmResult<LoginResponse> {
    let email = request.email.trim().to_lowercase();
    let user = user_db::get_user_by_email(&state.db, &email).await?;

    let Some(user) = user else {
        tracing::warn!("Failed login for unknown email");
        return Err(CrmError::validation("Invalid email or password"));
    };
    if !verify_password(&request.password, &user.password).await? {
        tracing::warn!(user = %user.id, "Failed login");
        return Err(CrmError::validation("Invalid email or password"));
    }

    let (token, claims) = jwt::issue_token(user.id, &state.config.jwt_secret, state.config.session_ttl)
        .map_err(|e| CrmError::operation_failed(format!("token signing: {e}")))?;
    tracing::info!(user = %user.id, "User logged in");

    Ok(LoginResponse {
        token,
        expires_at: claims.exp,
        user: user.into(),
    })
}

/// A fresh form token for the actor's session. Replaces any earlier one.
pub async fn issue_csrf(state: &AppState, actor: &Actor) -> String {
    state.csrf.issue(&actor.session_id).await
}
