use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zimo_backend::api::handlers::AppStateInner;
use zimo_backend::api::routes::create_router;
use zimo_backend::config::Config;
use zimo_backend::{cache, db};

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Starting graceful shutdown...");
}

/// Describe collaborators that are configured but owned by other services
fn log_external_collaborators(config: &Config) {
    match &config.object_store {
        Some(store) => info!(
            endpoint = %store.endpoint,
            console = store.console_endpoint.as_deref().unwrap_or("-"),
            bucket = %store.bucket_name,
            secure = store.secure,
            "Object store configured"
        ),
        None => info!("Object store is disabled"),
    }

    match &config.messaging {
        Some(messaging) => info!(
            dead_letter_exchange = %messaging.dead_letter.exchange,
            dead_letter_queue = %messaging.dead_letter.queue,
            dead_letter_routing_key = %messaging.dead_letter.routing_key,
            publisher_confirms = messaging.publisher_confirms,
            mandatory = messaging.mandatory,
            "Message broker configured"
        ),
        None => info!("Message broker is disabled"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,zimo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting backend scaffold v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    // Initialize database backend
    info!("Connecting to database...");
    let database = db::init_database(&config.database)
        .await
        .context("Failed to initialize database")?;
    info!(backend = database.backend_name(), "Database connection established");

    // Initialize Redis cache (if enabled)
    let cache = cache::connect_optional(config.cache.redis.as_ref()).await;

    log_external_collaborators(&config);

    let addr = config.server_address();
    let state = Arc::new(AppStateInner {
        database,
        cache,
        config,
    });

    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind server")?;

    info!("Server listening on {}", addr);

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");

    Ok(())
}
