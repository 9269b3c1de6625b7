//! Error types for Biblioteca

use thiserror::Error;

/// Numeric error codes shown next to diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    BadValue = 18,
    NotAuthenticated = 22,
    IoFailure = 23,
    CorruptData = 24,
    VersionMismatch = 25,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not available: {0}")]
    Unavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) => ErrorCode::NotAuthenticated,
            AppError::Unauthorized(_) => ErrorCode::NotAuthorized,
            AppError::NotFound(_) => ErrorCode::NoSuchItem,
            AppError::Unavailable(_) => ErrorCode::ItemNotAvailable,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Io(_) => ErrorCode::IoFailure,
            AppError::CorruptSnapshot(_) => ErrorCode::CorruptData,
            AppError::UnsupportedVersion { .. } => ErrorCode::VersionMismatch,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// Whether the error must abort the session instead of being reported and skipped
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::CorruptSnapshot(_)
                | AppError::UnsupportedVersion { .. }
                | AppError::Internal(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            AppError::Io(e.into())
        } else {
            AppError::CorruptSnapshot(e.to_string())
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
