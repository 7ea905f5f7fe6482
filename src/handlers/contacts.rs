use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::contacts::{ContactFilter, ContactForm};
use crate::services::contacts as contact_service;
use crate::state::AppState;

/// GET /api/contacts
pub async fn get_contacts(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<ContactFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = contact_service::list_contacts(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/contacts/{id}
pub async fn get_contact(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let contact = contact_service::get_contact(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(contact))
}

/// POST /api/contacts
pub async fn create_contact(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ContactForm>,
) -> Result<HttpResponse, CrmError> {
    let contact = contact_service::create_contact(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(contact))
}

/// PUT /api/contacts/{id}
pub async fn update_contact(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<ContactForm>,
) -> Result<HttpResponse, CrmError> {
    let contact = contact_service::update_contact(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    contact_service::delete_contact(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Contact {id} deleted"),
    })))
}
