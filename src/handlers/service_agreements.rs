use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::service_agreements::{ServiceAgreementFilter, ServiceAgreementForm};
use crate::services::service_agreements as agreement_service;
use crate::state::AppState;

/// GET /api/service-agreements
pub async fn get_service_agreements(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<ServiceAgreementFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = agreement_service::list_service_agreements(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/service-agreements/{id}
pub async fn get_service_agreement(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let service_agreement = agreement_service::get_service_agreement(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(service_agreement))
}

/// POST /api/service-agreements
pub async fn create_service_agreement(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ServiceAgreementForm>,
) -> Result<HttpResponse, CrmError> {
    let service_agreement = agreement_service::create_service_agreement(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(service_agreement))
}

/// PUT /api/service-agreements/{id}
pub async fn update_service_agreement(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ServiceAgreementForm>,
) -> Result<HttpResponse, CrmError> {
    let service_agreement = agreement_service::update_service_agreement(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(service_agreement))
}

/// DELETE /api/service-agreements/{id}
pub async fn delete_service_agreement(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    agreement_service::delete_service_agreement(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Service agreement {id} deleted"),
    })))
}
