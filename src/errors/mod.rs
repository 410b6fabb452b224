//! Error taxonomy, business errors and the boundary translator

pub mod business;
pub mod codes;
pub mod translator;

pub use business::BusinessError;
pub use codes::ErrorCode;
pub use translator::AppError;
