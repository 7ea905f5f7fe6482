use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::pin::Pin;

use crate::auth::{Actor, jwt};
use crate::db::users as user_db;
use crate::state::AppState;

/// Extractor that resolves the bearer token into an [`Actor`].
///
/// The role name is read from the store on every request, so role changes take
/// effect without a new login.
pub struct AuthenticatedUser(pub Actor);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    actix_web::error::ErrorUnauthorized("Missing Authorization header")
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;

            // 2. Get the shared state.
            let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Application state not configured")
            })?;

            // 3. Validate the session token.
            let claims = jwt::validate_token(token, &state.config.jwt_secret)
                .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims
                .user_id()
                .map_err(actix_web::error::ErrorUnauthorized)?;

            // 4. Load the user and the current name of their role.
            let (user, role) = user_db::get_user_with_role(&state.db, user_id)
                .await
                .map_err(|e| {
                    actix_web::error::ErrorInternalServerError(format!("Database error: {e}"))
                })?
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unknown user"))?;

            Ok(AuthenticatedUser(Actor {
                id: user.id,
                name: user.name,
                email: user.email,
                role_id: role.id,
                role: role.name,
                session_id: claims.sid,
            }))
        })
    }
}

/// Reads the CSRF token a mutating request carries in the `X-CSRF-Token` header.
pub fn csrf_token(req: &HttpRequest) -> String {
    req.headers()
        .get("X-CSRF-Token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
