use std::fmt;

/// Result codes returned inside every response envelope.
///
/// Ranges: 2xx success, 4xx client errors, 5xx server errors, 1000+ business
/// rule violations. Codes are part of the wire contract and must never be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // ========== Success ==========
    Success,

    // ========== Client errors (4xx) ==========
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    ValidationFailed,
    TooManyRequests,

    // ========== Server errors (5xx) ==========
    InternalServerError,
    ServiceUnavailable,

    // ========== Business errors (1xxx) ==========
    BusinessError,
    UserNotFound,
    InvalidCredentials,
    UserAlreadyExists,
    UserDisabled,
    InvalidToken,
    TokenExpired,
    FileUploadFailed,
    FileTypeNotSupported,
    FileSizeExceeded,
    DataAlreadyExists,
    DataNotFound,
    DataStatusError,
    /// Row version changed between read and write
    OptimisticLockFailed,
}

impl ErrorCode {
    /// Every taxonomy entry, in declaration order
    pub const ALL: [ErrorCode; 24] = [
        Self::Success,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::ValidationFailed,
        Self::TooManyRequests,
        Self::InternalServerError,
        Self::ServiceUnavailable,
        Self::BusinessError,
        Self::UserNotFound,
        Self::InvalidCredentials,
        Self::UserAlreadyExists,
        Self::UserDisabled,
        Self::InvalidToken,
        Self::TokenExpired,
        Self::FileUploadFailed,
        Self::FileTypeNotSupported,
        Self::FileSizeExceeded,
        Self::DataAlreadyExists,
        Self::DataNotFound,
        Self::DataStatusError,
        Self::OptimisticLockFailed,
    ];

    /// Numeric code serialized to clients
    pub const fn code(&self) -> i32 {
        match self {
            Self::Success => 200,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::ValidationFailed => 422,
            Self::TooManyRequests => 429,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
            Self::BusinessError => 1000,
            Self::UserNotFound => 1001,
            Self::InvalidCredentials => 1002,
            Self::UserAlreadyExists => 1003,
            Self::UserDisabled => 1004,
            Self::InvalidToken => 1010,
            Self::TokenExpired => 1011,
            Self::FileUploadFailed => 1020,
            Self::FileTypeNotSupported => 1021,
            Self::FileSizeExceeded => 1022,
            Self::DataAlreadyExists => 1030,
            Self::DataNotFound => 1031,
            Self::DataStatusError => 1032,
            Self::OptimisticLockFailed => 1040,
        }
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "operation succeeded",
            Self::BadRequest => "bad request parameters",
            Self::Unauthorized => "not authenticated, please log in first",
            Self::Forbidden => "access denied",
            Self::NotFound => "resource not found",
            Self::MethodNotAllowed => "request method not supported",
            Self::ValidationFailed => "request parameter validation failed",
            Self::TooManyRequests => "too many requests, please try again later",
            Self::InternalServerError => "internal server error",
            Self::ServiceUnavailable => "service temporarily unavailable, please try again later",
            Self::BusinessError => "business processing failed",
            Self::UserNotFound => "user not found",
            Self::InvalidCredentials => "invalid username or password",
            Self::UserAlreadyExists => "user already exists",
            Self::UserDisabled => "user has been disabled",
            Self::InvalidToken => "invalid token",
            Self::TokenExpired => "token has expired",
            Self::FileUploadFailed => "file upload failed",
            Self::FileTypeNotSupported => "file type not supported",
            Self::FileSizeExceeded => "file size exceeds the limit",
            Self::DataAlreadyExists => "data already exists",
            Self::DataNotFound => "data not found",
            Self::DataStatusError => "data is in an invalid state",
            Self::OptimisticLockFailed => "data has been modified, please refresh and retry",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}
