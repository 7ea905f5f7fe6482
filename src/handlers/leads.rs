use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::leads::{LeadFilter, LeadForm};
use crate::services::leads as lead_service;
use crate::state::AppState;

/// GET /api/leads: `?tab=open|won|lost` partitions by status; other filters AND together.
pub async fn get_leads(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<LeadFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = lead_service::list_leads(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/leads/{id}
pub async fn get_lead(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let lead = lead_service::get_lead(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(lead))
}

/// POST /api/leads
pub async fn create_lead(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<LeadForm>,
) -> Result<HttpResponse, CrmError> {
    let lead = lead_service::create_lead(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(lead))
}

/// PUT /api/leads/{id}
pub async fn update_lead(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<LeadForm>,
) -> Result<HttpResponse, CrmError> {
    let lead = lead_service::update_lead(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(lead))
}

/// DELETE /api/leads/{id}: offers of the lead are kept and detached.
pub async fn delete_lead(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    lead_service::delete_lead(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Lead {id} deleted"),
    })))
}
