use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::agreement_types::AgreementTypeForm;
use crate::services::agreement_types as agreement_type_service;
use crate::state::AppState;

/// GET /api/agreement-types: ordered by label, each with its usage count.
pub async fn get_agreement_types(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CrmError> {
    let types = agreement_type_service::list_agreement_types(&state, &user.0).await?;
    Ok(HttpResponse::Ok().json(types))
}

/// GET /api/agreement-types/{id}
pub async fn get_agreement_type(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let summary =
        agreement_type_service::get_agreement_type(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// POST /api/agreement-types
pub async fn create_agreement_type(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AgreementTypeForm>,
) -> Result<HttpResponse, CrmError> {
    let created = agreement_type_service::create_agreement_type(
        &state,
        &user.0,
        &csrf_token(&req),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/agreement-types/{id}: the name is kept as-is while the type is in use.
pub async fn update_agreement_type(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<AgreementTypeForm>,
) -> Result<HttpResponse, CrmError> {
    let updated = agreement_type_service::update_agreement_type(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/agreement-types/{id}
pub async fn delete_agreement_type(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    agreement_type_service::delete_agreement_type(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Agreement type {id} deleted"),
    })))
}
