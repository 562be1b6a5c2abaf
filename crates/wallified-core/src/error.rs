//! Error handling for Wallified
//!
//! Provides error types for every external collaborator:
//! - Storage errors (binary uploads)
//! - Record errors (row/document store)
//! - Payment errors (hosted payment processor)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Object storage error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The storage backend could not be reached
    #[error("Storage backend unavailable")]
    Unavailable,

    /// The upload was refused
    #[error("Upload rejected for '{name}': {reason}")]
    Rejected {
        /// The suggested object name.
        name: String,
        /// The reason the upload was rejected.
        reason: String,
    },
}

/// Record store error type
///
/// Represents failures of the generic row/document store: connectivity,
/// malformed records, and backend-reported failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The record store could not be reached
    #[error("Record store unavailable")]
    Unavailable,

    /// A record was not a JSON object
    #[error("Invalid record for '{collection}': {reason}")]
    InvalidRecord {
        /// The target collection.
        collection: String,
        /// Why the record was refused.
        reason: String,
    },

    /// The backend reported an error
    #[error("Record store error: {0}")]
    Backend(String),
}

/// Payment processor error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    /// Amount must be positive
    #[error("Invalid payment amount: {amount}")]
    InvalidAmount {
        /// The rejected amount in rupees.
        amount: u32,
    },

    /// The payment was declined
    #[error("Payment declined: {reason}")]
    Declined {
        /// The reason reported by the processor.
        reason: String,
    },

    /// The referenced payment intent does not exist
    #[error("Unknown payment intent: {0}")]
    UnknownIntent(String),

    /// The payment processor could not be reached
    #[error("Payment processor unavailable")]
    Unavailable,
}

/// Main error type for Wallified
///
/// A unified error type that can represent any collaborator failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Object storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Record store error
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Payment error
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the failure is a connectivity problem worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Storage(StorageError::Unavailable)
                | Error::Record(RecordError::Unavailable)
                | Error::Payment(PaymentError::Unavailable)
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
