//! Custom error types for the wallet ledger
//!
//! Every failure is either a validation failure (bad user input, always
//! recoverable, never corrupts state) or an infrastructure failure (storage
//! could not be read or written). The helpers at the bottom classify variants
//! into exactly one of those two kinds.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Bad user input: non-positive amount, blank category, unknown type
    #[error("Validation error: {0}")]
    Validation(String),

    /// A bulk import line could not be accepted
    #[error("Import error at line {line}: {message}")]
    Import { line: usize, message: String },

    /// Sender and recipient are the same account (case-insensitive)
    #[error("Cannot transfer to self: {0}")]
    SelfTransfer(String),

    /// The recipient of a transfer has no wallet yet
    #[error("Recipient '{0}' not found")]
    UnknownRecipient(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The sender was debited in memory but the recipient wallet could not
    /// be persisted. The books are unbalanced until the transfer is retried
    /// or the sender wallet is reloaded without saving.
    #[error("Transfer to '{recipient}' was not delivered: {reason}")]
    TransferNotDelivered { recipient: String, reason: String },
}

impl LedgerError {
    /// Create an import error for a 1-based line number
    pub fn import(line: usize, message: impl Into<String>) -> Self {
        Self::Import {
            line,
            message: message.into(),
        }
    }

    /// Line number of an import failure, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Import { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Check if this is a validation failure (bad input, state untouched)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Import { .. }
                | Self::SelfTransfer(_)
                | Self::UnknownRecipient(_)
        )
    }

    /// Check if this is an infrastructure failure (storage, I/O, config)
    pub fn is_infrastructure(&self) -> bool {
        !self.is_validation()
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
