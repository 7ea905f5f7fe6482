use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::users::{CreateUser, UpdateUser, UserFilter};
use crate::services::users as user_service;
use crate::state::AppState;

/// GET /api/users: `?search=&role_id=&page=`
pub async fn get_users(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<UserFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = user_service::list_users(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/users/{id}
pub async fn get_user(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let found = user_service::get_user(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// POST /api/users
pub async fn create_user(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateUser>,
) -> Result<HttpResponse, CrmError> {
    let created =
        user_service::create_user(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/users/{id}: leave `new_password` empty to keep the current password.
pub async fn update_user(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> Result<HttpResponse, CrmError> {
    let updated = user_service::update_user(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    user_service::delete_user(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User {id} deleted"),
    })))
}
