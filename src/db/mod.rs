pub mod backend;
pub mod safety;

#[cfg(feature = "postgres")]
pub mod postgres;

use anyhow::Result;
use std::sync::Arc;

#[cfg(feature = "postgres")]
pub use postgres::PostgresBackend;

pub use backend::{DatabaseBackend, PoolStatus};

/// Database connection type - polymorphic over backends
pub type Database = Arc<dyn DatabaseBackend>;

/// Initialize database backend based on configuration
#[cfg(feature = "postgres")]
pub async fn init_database(config: &crate::config::DatabaseConfig) -> Result<Database> {
    tracing::info!("Initializing PostgreSQL backend");
    let pool = postgres::connection::create_pool(config).await?;
    postgres::connection::test_connection(&pool).await?;
    let backend = PostgresBackend::new(pool);
    Ok(Arc::new(backend) as Database)
}

#[cfg(not(feature = "postgres"))]
pub async fn init_database(_config: &crate::config::DatabaseConfig) -> Result<Database> {
    anyhow::bail!("Database support not compiled (missing postgres feature)")
}
