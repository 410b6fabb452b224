use utoipa::OpenApi;

use crate::api::handlers::{Liveness, ReadinessEnvelope, ReadinessReport, StringEnvelope};
use crate::db::PoolStatus;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backend Scaffold",
        version = "0.1.0",
        description = "Layered backend scaffold. Every endpoint answers with the {code, message, data, timestamp} envelope; business rejections keep HTTP 200 and carry a 1xxx code.",
    ),
    paths(
        crate::api::handlers::hello,
        crate::api::handlers::health,
        crate::api::handlers::health_live,
        crate::api::handlers::health_ready,
    ),
    components(
        schemas(
            StringEnvelope,
            ReadinessEnvelope,
            ReadinessReport,
            PoolStatus,
            Liveness,
        )
    ),
    tags(
        (name = "hello", description = "Sample endpoint"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
