use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::errors::ErrorCode;

/// Uniform envelope returned by every endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Result code (200 on success)
    pub code: i32,
    /// Human-readable message
    pub message: String,
    /// Payload, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Creation time
    #[serde(with = "crate::utils::datetime::date_time")]
    pub timestamp: NaiveDateTime,
}

impl<T> ApiResponse<T> {
    fn build(code: i32, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
            timestamp: Local::now().naive_local(),
        }
    }

    pub fn success(data: T) -> Self {
        Self::success_with_message(ErrorCode::Success.message(), data)
    }

    /// Success without payload
    pub fn ok() -> Self {
        Self::build(ErrorCode::Success.code(), ErrorCode::Success.message(), None)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self::build(ErrorCode::Success.code(), message, Some(data))
    }

    /// Generic server failure
    pub fn error() -> Self {
        Self::from_code(ErrorCode::InternalServerError)
    }

    pub fn error_message(message: impl Into<String>) -> Self {
        Self::error_with(ErrorCode::InternalServerError.code(), message)
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::error_with(code.code(), code.message())
    }

    pub fn error_with(code: i32, message: impl Into<String>) -> Self {
        Self::build(code, message, None)
    }

    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::Success.code()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_carries_payload() {
        for payload in [0, 1, -7, i64::MAX] {
            let response = ApiResponse::success(payload);
            assert!(response.is_success());
            assert_eq!(response.data, Some(payload));
            assert_eq!(response.message, "operation succeeded");
        }
    }

    #[test]
    fn test_success_with_custom_message() {
        let response = ApiResponse::success_with_message("created", vec!["a"]);
        assert_eq!(response.code, 200);
        assert_eq!(response.message, "created");
        assert!(response.is_success());
    }

    #[test]
    fn test_ok_has_no_payload() {
        let response = ApiResponse::<String>::ok();
        assert!(response.is_success());
        assert!(response.data.is_none());
    }

    #[test]
    fn test_error_constructors_are_failures() {
        let responses: Vec<ApiResponse<()>> = vec![
            ApiResponse::error(),
            ApiResponse::error_message("boom"),
            ApiResponse::from_code(ErrorCode::UserNotFound),
            ApiResponse::from_code(ErrorCode::BadRequest),
            ApiResponse::error_with(1234, "custom"),
        ];
        for response in responses {
            assert!(!response.is_success());
            assert!(response.data.is_none());
        }
    }

    #[test]
    fn test_default_error_is_fixed() {
        let first = ApiResponse::<()>::error();
        let second = ApiResponse::<()>::error();
        assert_eq!((first.code, &first.message), (second.code, &second.message));
        assert_eq!(first.code, 500);
        assert_eq!(first.message, ErrorCode::InternalServerError.message());
    }

    #[test]
    fn test_error_message_keeps_server_code() {
        let response = ApiResponse::<()>::error_message("upstream refused");
        assert_eq!(response.code, 500);
        assert_eq!(response.message, "upstream refused");
    }

    #[test]
    fn test_serialization_omits_missing_data() {
        let json = serde_json::to_value(ApiResponse::<String>::from_code(ErrorCode::NotFound)).unwrap();
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "resource not found");
        assert!(json.get("data").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_serialization_includes_data() {
        let json = serde_json::to_value(ApiResponse::success(json!({"id": 7}))).unwrap();
        assert_eq!(json["data"]["id"], 7);
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(
            NaiveDateTime::parse_from_str(timestamp, crate::utils::datetime::DATE_TIME_FORMAT)
                .is_ok()
        );
    }

    #[test]
    fn test_into_response_is_transport_ok() {
        let response = ApiResponse::<()>::from_code(ErrorCode::UserDisabled).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
