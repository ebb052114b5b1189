//! Error types for the service layer.

use uo_core::EvalError;
use uo_store::StoreError;

/// Result type for service operations.
pub type AppResult<T> = Result<T, AppError>;

/// Wraps evaluator and store errors behind one interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// External side channel (webhook) failed. Never fails an evaluation;
    /// surfaced only when the caller asked for the notification itself.
    #[error("External service error: {what}")]
    External { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
