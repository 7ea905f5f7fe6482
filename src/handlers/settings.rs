use actix_web::{HttpRequest, HttpResponse, web};
use std::collections::BTreeMap;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::services::settings as settings_service;
use crate::state::AppState;

/// GET /api/settings: every known key with its effective value.
pub async fn get_settings(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CrmError> {
    let all = settings_service::get_all(&state, &user.0).await?;
    Ok(HttpResponse::Ok().json(all))
}

/// PUT /api/settings: body is a `{key: value}` map; all or nothing.
pub async fn update_settings(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<BTreeMap<String, String>>,
) -> Result<HttpResponse, CrmError> {
    let updated =
        settings_service::set_all(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "updated": updated })))
}
