//! Unified application error type.
//! Store, tracker, config and CLI layers all return AppError so the binary
//! has a single place to render failures.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Invalid timestamp in database: {0}")]
    InvalidTimestamp(String),

    // ---------------------------
    // Invalid state transitions
    // ---------------------------
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("You are already working on '{name}' (task #{id}). Pause it first.")]
    AnotherTaskActive { id: i64, name: String },

    // ---------------------------
    // Missing records
    // ---------------------------
    #[error("Task #{0} not found")]
    TaskNotFound(i64),

    #[error("Project #{0} not found")]
    ProjectNotFound(i64),

    // ---------------------------
    // Config / sync / output
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sync error: {0}")]
    Sync(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Db(_) | AppError::Migration(_) | AppError::InvalidTimestamp(_)
        )
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            AppError::InvalidState(_) | AppError::AnotherTaskActive { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::TaskNotFound(_) | AppError::ProjectNotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
