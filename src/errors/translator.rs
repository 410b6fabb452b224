//! Boundary translation of request failures into response envelopes.
//!
//! Handlers return `Result<_, AppError>`; the `IntoResponse` impl below is the
//! single place where failures become HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use super::business::BusinessError;
use super::codes::ErrorCode;
use crate::api::response::ApiResponse;
use crate::api::validation::FieldError;

/// Separator between aggregated validation messages
pub const MESSAGE_SEPARATOR: &str = "; ";

/// Response extension marking a body already produced by the translator
#[derive(Debug, Clone, Copy)]
pub struct Translated;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BusinessError),

    /// Request body failed field validation
    #[error("request body validation failed: {}", join_fields(.0))]
    BodyValidation(Vec<FieldError>),

    /// Query-bound parameters failed field validation
    #[error("parameter binding failed: {}", join_fields(.0))]
    BindValidation(Vec<FieldError>),

    /// Individual handler parameters violated constraints
    #[error("constraint violation: {}", .0.join(MESSAGE_SEPARATOR))]
    ConstraintViolation(Vec<String>),

    #[error("missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("parameter '{name}' should be of type {expected}")]
    TypeMismatch { name: String, expected: String },

    /// Body or query string could not be decoded at all
    #[error("{0}")]
    UnreadableRequest(String),

    #[error("no endpoint for {method} {path}")]
    NoRoute { method: String, path: String },

    #[error("request method {method} not supported")]
    MethodNotAllowed { method: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR)
}

impl AppError {
    /// Transport status and envelope for this failure, without side effects
    pub fn translate(&self) -> (StatusCode, ApiResponse<()>) {
        match self {
            Self::Business(e) => (StatusCode::OK, ApiResponse::error_with(e.code(), e.message())),
            Self::BodyValidation(errors) | Self::BindValidation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error_with(ErrorCode::ValidationFailed.code(), join_fields(errors)),
            ),
            Self::ConstraintViolation(messages) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error_with(
                    ErrorCode::ValidationFailed.code(),
                    messages.join(MESSAGE_SEPARATOR),
                ),
            ),
            Self::MissingParameter { .. }
            | Self::TypeMismatch { .. }
            | Self::UnreadableRequest(_) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error_with(ErrorCode::BadRequest.code(), self.to_string()),
            ),
            Self::NoRoute { .. } => (
                StatusCode::NOT_FOUND,
                ApiResponse::error_with(ErrorCode::NotFound.code(), self.to_string()),
            ),
            Self::MethodNotAllowed { .. } => (
                StatusCode::METHOD_NOT_ALLOWED,
                ApiResponse::error_with(ErrorCode::MethodNotAllowed.code(), self.to_string()),
            ),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ApiResponse::error()),
        }
    }

    fn log(&self) {
        match self {
            Self::Business(e) => {
                warn!(
                    code = e.code(),
                    message = %e.message(),
                    source = ?std::error::Error::source(e),
                    "Business rule rejected request"
                );
            }
            Self::BodyValidation(errors) => {
                warn!(fields = %field_names(errors), "Request body validation failed: {}", self);
            }
            Self::BindValidation(errors) => {
                warn!(fields = %field_names(errors), "Parameter binding failed: {}", self);
            }
            Self::ConstraintViolation(_) => warn!("{}", self),
            Self::MissingParameter { name } => {
                warn!(parameter = %name, "{}", self);
            }
            Self::TypeMismatch { name, expected } => {
                warn!(parameter = %name, expected = %expected, "{}", self);
            }
            Self::UnreadableRequest(_) => warn!("Unreadable request: {}", self),
            Self::NoRoute { method, path } => {
                warn!(method = %method, path = %path, "{}", self);
            }
            Self::MethodNotAllowed { method } => warn!(method = %method, "{}", self),
            Self::Internal(e) => error!(error = ?e, "Unhandled error while processing request"),
        }
    }
}

fn field_names(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, body) = self.translate();
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(Translated);
        response
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        Self::Business(BusinessError::from_code(code))
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(anyhow::Error::new(err).context("database error"))
    }
}

#[cfg(feature = "redis_cache")]
impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        Self::Internal(anyhow::Error::new(err).context("cache error"))
    }
}
