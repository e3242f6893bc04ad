use reqwest::StatusCode;
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Form input failed validation; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session token is stored.
    #[error("Not signed in")]
    Unauthenticated,

    /// The backend answered with a status the operation treats as failure.
    #[error("Request rejected with {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Api {
        /// The response status.
        status: StatusCode,
        /// The server-supplied `error` field, if the body carried one.
        message: Option<String>,
    },

    /// No response could be obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response whose body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Client-local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// An invalid endpoint or base URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Returns the server-supplied message, when the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the failure happened before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }

    /// Logs the error at a level matching its class.
    pub fn log(&self, operation: &str) {
        match self {
            AppError::Validation(msg) => {
                tracing::debug!("Validation error during {}: {}", operation, msg);
            }
            AppError::Unauthenticated => {
                tracing::warn!("🔒 {} attempted without a session", operation);
            }
            AppError::Api { status, message } => {
                tracing::warn!(
                    "❌ {} rejected ({}): {}",
                    operation,
                    status,
                    message.as_deref().unwrap_or("-")
                );
            }
            AppError::Transport(e) => {
                tracing::error!("❌ {} transport failure: {}", operation, e);
            }
            other => {
                tracing::error!("❌ {} failed: {}", operation, other);
            }
        }
    }
}
