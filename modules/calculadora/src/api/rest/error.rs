use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::domain::DomainError;
use crate::domain::arithmetic::ArithmeticError;
use crate::domain::registers::RegisterError;
use crate::domain::validator::ValidationError;

use super::dto::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by every calculadora handler, rendered as
/// `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: "M\u{e9}todo no permitido".to_owned(),
        }
    }

    /// The request body is not the JSON object the endpoint expects.
    #[must_use]
    pub fn malformed_body(err: &serde_json::Error) -> Self {
        tracing::debug!(error = %err, "malformed request body");
        Self::bad_request(format!("Cuerpo JSON inv\u{e1}lido: {err}"))
    }
}

/// Map a domain error to its HTTP shape. Every domain failure is the
/// caller's fault, so all of them are 400.
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        tracing::debug!(kind = e.kind(), error = %e, "request rejected");
        Self::bad_request(e.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        DomainError::from(e).into()
    }
}

impl From<ArithmeticError> for ApiError {
    fn from(e: ArithmeticError) -> Self {
        DomainError::from(e).into()
    }
}

impl From<RegisterError> for ApiError {
    fn from(e: RegisterError) -> Self {
        DomainError::from(e).into()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "malformed query string");
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
