//! Error types for the OpenLedger point ledger.
//!
//! All errors use the `OL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Precondition failures (user-actionable, non-retryable)
//! - 2xx: Storage / transport failures (caller decides retry policy)
//! - 9xx: General / internal errors
//!
//! Routing ambiguity is deliberately not an error: unknown balance keys take
//! the logged default-partition fallback instead of rejecting.

use thiserror::Error;

/// Central error enum for all OpenLedger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Precondition Errors (1xx)
    // =================================================================
    /// The acting user's coin balance would go negative. Carries the
    /// minimum balance the action requires.
    #[error("OL_ERR_100: Insufficient balance: need {required}, have {balance}")]
    InsufficientBalance { required: i64, balance: i64 },

    // =================================================================
    // Storage / Transport Errors (2xx)
    // =================================================================
    /// A storage-layer fault (connectivity, constraint violation,
    /// serialization conflict). Propagated unchanged.
    #[error("OL_ERR_200: Storage error: {0}")]
    Storage(String),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OL_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

// Conversion from std::io::Error
impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
