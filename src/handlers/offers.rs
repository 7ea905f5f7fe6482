use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::offers::{OfferFilter, OfferForm};
use crate::services::offers as offer_service;
use crate::state::AppState;

/// GET /api/offers
pub async fn get_offers(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<OfferFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = offer_service::list_offers(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/leads/{id}/offers
pub async fn get_offers_for_lead(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let offers = offer_service::list_offers_for_lead(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(offers))
}

/// GET /api/offers/{id}
pub async fn get_offer(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let offer = offer_service::get_offer(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(offer))
}

/// POST /api/offers
pub async fn create_offer(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<OfferForm>,
) -> Result<HttpResponse, CrmError> {
    let offer = offer_service::create_offer(&state, &user.0, &csrf_token(&req), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(offer))
}

/// PUT /api/offers/{id}
pub async fn update_offer(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<OfferForm>,
) -> Result<HttpResponse, CrmError> {
    let offer = offer_service::update_offer(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(offer))
}

/// DELETE /api/offers/{id}: refused while a project was created from the offer.
pub async fn delete_offer(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    offer_service::delete_offer(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Offer {id} deleted"),
    })))
}
