use std::error::Error as StdError;
use std::fmt;

use super::codes::ErrorCode;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Expected rule violation raised by application logic.
///
/// Carries the code/message pair that ends up in the response envelope. The
/// optional source is only ever logged, never sent to clients.
#[derive(Debug)]
pub struct BusinessError {
    code: i32,
    message: String,
    source: Option<BoxError>,
}

impl BusinessError {
    /// Generic business failure (code 1000) with a custom message
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BusinessError, message)
    }

    /// Code and message copied from a taxonomy entry
    pub fn from_code(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    /// Taxonomy code with an overriding message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::custom(code.code(), message)
    }

    /// Fully custom code and message
    pub fn custom(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorCode> for BusinessError {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for BusinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "business error {}: {}", self.code, self.message)
    }
}

impl StdError for BusinessError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}
