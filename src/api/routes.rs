use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::cors::cors_layer;
use super::handlers::{health, health_live, health_ready, hello, AppState};
use super::middleware::{
    logging_middleware, panic_response, route_not_found, translate_method_not_allowed,
};
use super::openapi::ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/hello", get(hello))
        .layer(cors_layer(&state.config.cors));

    let app = Router::new()
        // Health check
        .route("/health", get(health))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        // Application endpoints
        .nest("/api", api)
        // OpenAPI documentation
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    with_error_boundary(app)
}

/// Route every failure the router itself produces through the translator.
///
/// Layer order, innermost first: 405 translation -> panic catching ->
/// request logging -> trace.
pub fn with_error_boundary(router: Router) -> Router {
    router
        .fallback(route_not_found)
        .layer(middleware::from_fn(translate_method_not_allowed))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
