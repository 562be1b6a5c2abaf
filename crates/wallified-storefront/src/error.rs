//! Storefront error type.

use thiserror::Error;
use wallified_core::{PaymentError, RecordError, Rupees};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorefrontError {
    /// A form field failed validation; the message is shown as-is
    #[error("{0}")]
    Validation(String),

    #[error("Minimum order value is {minimum} (cart subtotal {subtotal})")]
    MinimumOrder { subtotal: Rupees, minimum: Rupees },

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Could not reach the store: {0}")]
    Persistence(String),

    #[error("{0} is not an administrator")]
    NotAuthorized(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl StorefrontError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        StorefrontError::Validation(message.into())
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StorefrontError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<RecordError> for StorefrontError {
    fn from(err: RecordError) -> Self {
        StorefrontError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for StorefrontError {
    fn from(err: serde_json::Error) -> Self {
        StorefrontError::Persistence(format!("malformed record: {}", err))
    }
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;
