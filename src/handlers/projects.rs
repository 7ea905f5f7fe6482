use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::projects::{ProjectFilter, ProjectForm};
use crate::services::projects as project_service;
use crate::state::AppState;

/// GET /api/projects
pub async fn get_projects(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<ProjectFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = project_service::list_projects(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/projects/{id}
pub async fn get_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let project = project_service::get_project(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// POST /api/projects: an accepted `offer_id` fills in a missing business and budget.
pub async fn create_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ProjectForm>,
) -> Result<HttpResponse, CrmError> {
    let project = project_service::create_project(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ProjectForm>,
) -> Result<HttpResponse, CrmError> {
    let project = project_service::update_project(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    project_service::delete_project(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Project {id} deleted"),
    })))
}
