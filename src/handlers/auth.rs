use actix_web::{HttpResponse, web};

use crate::auth::middleware::AuthenticatedUser;
use crate::error::CrmError;
use crate::services::auth::{self as auth_service, LoginRequest};
use crate::state::AppState;

/// POST /api/auth/login: exchange email and password for a session token.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, CrmError> {
    let response = auth_service::login(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/auth/me: the current actor, including the role name.
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(user.0)
}

/// GET /api/auth/csrf: a form token for the next mutating request.
pub async fn csrf(user: AuthenticatedUser, state: web::Data<AppState>) -> HttpResponse {
    let token = auth_service::issue_csrf(&state, &user.0).await;
    HttpResponse::Ok().json(serde_json::json!({ "csrf_token": token }))
}
