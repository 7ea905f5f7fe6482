use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::middleware::{AuthenticatedUser, csrf_token};
use crate::error::CrmError;
use crate::models::PageQuery;
use crate::models::notifications::RecentQuery;
use crate::services::notifications as notification_service;
use crate::state::AppState;

/// GET /api/notifications: the full list. Viewing it marks everything read.
pub async fn get_notifications(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, CrmError> {
    let page = notification_service::view_all(&state, &user.0, query.page()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/notifications/recent: newest first, for the header dropdown. Read-only.
pub async fn get_recent(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse, CrmError> {
    let recent = notification_service::list_recent(&state, &user.0, query.limit()).await?;
    let unread = notification_service::unread_count(&state, &user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "notifications": recent,
        "unread": unread,
    })))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, CrmError> {
    state.csrf.verify(&user.0.session_id, &csrf_token(&req)).await?;
    let marked = notification_service::mark_all_read(&state, &user.0).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "marked": marked })))
}
