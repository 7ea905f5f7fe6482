use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Outcome of a rejected workflow. Every variant renders as one `{"error": ...}` body.
#[derive(Error, Debug)]
pub enum CrmError {
    /// Malformed or missing input; the caller should correct the form and resubmit.
    #[error("{0}")]
    Validation(String),

    /// The actor's role does not grant the required permission.
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Blocked by a referential-integrity, uniqueness or protected-record rule.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// CSRF token missing or mismatched. Deliberately says nothing more.
    #[error("Invalid request")]
    InvalidRequest,

    /// Store failure. The detail is logged, never shown to the caller.
    #[error("The operation failed, please try again")]
    OperationFailed(String),
}

impl CrmError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CrmError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        CrmError::Conflict(msg.into())
    }

    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        CrmError::NotFound(format!("{what} {id} not found"))
    }

    /// Logs the detail where the failure happens; callers only see the generic message.
    pub fn operation_failed(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!("Operation failed: {detail}");
        CrmError::OperationFailed(detail)
    }
}

impl From<DbErr> for CrmError {
    fn from(e: DbErr) -> Self {
        CrmError::operation_failed(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for CrmError {
    fn from(e: bcrypt::BcryptError) -> Self {
        CrmError::operation_failed(format!("password hashing: {e}"))
    }
}

impl ResponseError for CrmError {
    fn status_code(&self) -> StatusCode {
        match self {
            CrmError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CrmError::Forbidden => StatusCode::FORBIDDEN,
            CrmError::Conflict(_) => StatusCode::CONFLICT,
            CrmError::NotFound(_) => StatusCode::NOT_FOUND,
            CrmError::InvalidRequest => StatusCode::BAD_REQUEST,
            CrmError::OperationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

pub type CrmResult<T> = Result<T, CrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_do_not_leak_detail() {
        let err = CrmError::from(DbErr::Custom("relation \"leads\" does not exist".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("leads"));
        assert!(matches!(err, CrmError::OperationFailed(detail) if detail.contains("leads")));
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(CrmError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(CrmError::InvalidRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CrmError::conflict("in use").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(CrmError::InvalidRequest.to_string(), "Invalid request");
    }
}
