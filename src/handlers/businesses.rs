use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::businesses::{BusinessFilter, BusinessForm};
use crate::services::businesses as business_service;
use crate::state::AppState;

/// GET /api/businesses: search, filter by industry, paginate by name.
pub async fn get_businesses(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<BusinessFilter>,
) -> Result<HttpResponse, CrmError> {
    let page = business_service::list_businesses(&state, &user.0, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/businesses/{id}
pub async fn get_business(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let business = business_service::get_business(&state, &user.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(business))
}

/// POST /api/businesses
pub async fn create_business(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<BusinessForm>,
) -> Result<HttpResponse, CrmError> {
    let business =
        business_service::create_business(&state, &user.0, &csrf_token(&req), body.into_inner())
            .await?;
    Ok(HttpResponse::Created().json(business))
}

/// PUT /api/businesses/{id}
pub async fn update_business(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<BusinessForm>,
) -> Result<HttpResponse, CrmError> {
    let business = business_service::update_business(
        &state,
        &user.0,
        &csrf_token(&req),
        path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(business))
}

/// DELETE /api/businesses/{id}: refused while anything still references the business.
pub async fn delete_business(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, CrmError> {
    let id = path.into_inner();
    business_service::delete_business(&state, &user.0, &csrf_token(&req), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Business {id} deleted"),
    })))
}
