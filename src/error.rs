//! Error types for tdl
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown item or category, bad args, bad config)
//! - 4: Operation failed (store read/write, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tdl CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tdl operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("No category named '{0}'")]
    CategoryNotFound(String),

    #[error("No item with id '{0}'")]
    ItemNotFound(String),

    #[error("Category '{name}' still has {items} item(s)")]
    CategoryNotEmpty { name: String, items: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::CategoryNotFound(_)
            | Error::ItemNotFound(_)
            | Error::CategoryNotEmpty { .. }
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, when the variant has any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::CategoryNotEmpty { name, items } => Some(serde_json::json!({
                "category": name,
                "items": items,
            })),
            _ => None,
        }
    }
}

/// Result type alias for tdl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
