pub mod boundary;
pub mod logging;

pub use boundary::{panic_response, route_not_found, translate_method_not_allowed};
pub use logging::logging_middleware;
