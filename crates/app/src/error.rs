use morty_core::error::CoreError;
use morty_remote::RemoteError;

use crate::config::ConfigError;

/// Application-level error type for command handlers.
///
/// Wraps the per-crate errors so commands can use `?` throughout.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `morty_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The character API could not be reached or answered badly.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading an image file or the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A spawned view-model task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The remote character list could not be loaded; carries the
    /// user-facing message.
    #[error("{0}")]
    Unavailable(String),

    /// A bad command-line request with a human-readable message.
    #[error("{0}")]
    BadRequest(String),
}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
