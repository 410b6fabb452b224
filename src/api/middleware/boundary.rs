//! Failures produced by the router itself rather than by handlers

use anyhow::anyhow;
use axum::{
    extract::{OriginalUri, Request},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::errors::{translator::Translated, AppError};

/// Router fallback for paths with no matching route
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NoRoute {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Replace the router's bare 405 with an envelope, keeping `Allow`
pub async fn translate_method_not_allowed(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let response = next.run(request).await;

    if response.status() != StatusCode::METHOD_NOT_ALLOWED
        || response.extensions().get::<Translated>().is_some()
    {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut translated = AppError::MethodNotAllowed { method }.into_response();
    if let Some(allow) = allow {
        translated.headers_mut().insert(header::ALLOW, allow);
    }
    translated
}

/// Panic handler for `CatchPanicLayer`; the payload is logged, never returned
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow!("handler panicked: {detail}")).into_response()
}
