pub mod cors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod validation;

pub use response::ApiResponse;
