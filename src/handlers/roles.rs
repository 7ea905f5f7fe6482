use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::roles::RoleForm;
use crate::services::roles as role_service;
use crate::state::AppState;

/// GET /api/roles: every role with its user count.
pub async fn get_roles(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CrmError> {
    let roles = role_service::list_roles(&state, &user.0).await?;
    Ok(HttpResponse::Ok().json(roles))
}

/// GET /api/roles/{id}: the role with its permissions.
pub async fn get_role(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let role = role_service::get_role(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(role))
}

/// GET /api/permissions: the catalog grouped by module.
pub async fn get_permissions(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CrmError> {
    let groups = role_service::list_permissions(&state, &user.0).await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// POST /api/roles
pub async fn create_role(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<RoleForm>,
) -> Result<HttpResponse, CrmError> {
    let role =
        role_service::create_role(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(role))
}

/// PUT /api/roles/{id}: `permission_ids` replaces the whole set.
pub async fn update_role(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<RoleForm>,
) -> Result<HttpResponse, CrmError> {
    let role = role_service::update_role(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(role))
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    role_service::delete_role(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Role {id} deleted"),
    })))
}
