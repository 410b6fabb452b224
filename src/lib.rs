// Library exports for testing
pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod utils;

pub use api::ApiResponse;
pub use errors::{AppError, BusinessError, ErrorCode};
