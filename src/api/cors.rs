use axum::http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::config::CorsConfig;

fn is_wildcard(items: &[String]) -> bool {
    items.iter().any(|item| item == "*")
}

/// Build the CORS layer for the `/api` routes.
///
/// A `*` entry mirrors the request value instead of answering `*`, which
/// keeps credentialed requests valid.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    info!(
        origins = ?config.allowed_origins,
        methods = ?config.allowed_methods,
        credentials = config.allow_credentials,
        "Configuring CORS for /api"
    );

    let origins = if is_wildcard(&config.allowed_origins) {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| warn!(origin = %origin, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    let methods = if is_wildcard(&config.allowed_methods) {
        AllowMethods::mirror_request()
    } else {
        AllowMethods::list(config.allowed_methods.iter().filter_map(|method| {
            Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| warn!(method = %method, "Ignoring invalid CORS method"))
                .ok()
        }))
    };

    let headers = if is_wildcard(&config.allowed_headers) {
        AllowHeaders::mirror_request()
    } else {
        AllowHeaders::list(config.allowed_headers.iter().filter_map(|header| {
            HeaderName::from_bytes(header.to_ascii_lowercase().as_bytes())
                .map_err(|_| warn!(header = %header, "Ignoring invalid CORS header"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.allow_credentials)
        .max_age(Duration::from_secs(config.max_age_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::Service;

    fn config(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            allowed_methods: vec!["GET".into(), "POST".into()],
            allowed_headers: vec!["*".into()],
            allow_credentials: true,
            max_age_seconds: 600,
        }
    }

    async fn preflight(config: &CorsConfig, origin: &str) -> axum::response::Response {
        let mut app = Router::new()
            .route("/hello", get(|| async { "hi" }))
            .layer(cors_layer(config));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/hello")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
            .body(Body::empty())
            .unwrap();
        app.call(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_origin_is_mirrored() {
        let response = preflight(&config(&["*"]), "https://app.example").await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "600");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "x-custom");
    }

    #[tokio::test]
    async fn test_listed_origin_only() {
        let cfg = config(&["https://allowed.example"]);

        let allowed = preflight(&cfg, "https://allowed.example").await;
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://allowed.example"
        );

        let denied = preflight(&cfg, "https://evil.example").await;
        assert!(denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
