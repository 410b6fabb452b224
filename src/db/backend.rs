use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

/// Connection pool occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PoolStatus {
    /// Open connections
    pub size: u32,
    /// Connections waiting for work
    pub idle: usize,
}

/// Relational database handle shared by request handlers
#[async_trait]
pub trait DatabaseBackend: Send + Sync {
    /// Short identifier used in logs and health output
    fn backend_name(&self) -> &'static str;

    /// Round-trip a trivial statement
    async fn test_connection(&self) -> Result<()>;

    fn pool_status(&self) -> PoolStatus;
}
