//! Studio error type.
//!
//! Every failure is handled at the operation that caused it and surfaced to
//! the user as an advisory; none of them leave the editor state or its
//! history half-updated.

use thiserror::Error;
use wallified_core::{RecordError, StorageError};

use crate::model::ImageId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StudioError {
    /// More photos than the layout grid can hold
    #[error("Maximum {max} images allowed, {dropped} not added")]
    CapacityExceeded { max: usize, dropped: usize },

    /// A single uploaded file could not be decoded
    #[error("Could not read '{name}': {reason}")]
    DecodeFailure { name: String, reason: String },

    /// Submission attempted without any photo
    #[error("Please upload at least one image")]
    EmptyDesign,

    /// Upload or database call failed during submission
    #[error("Could not save design: {0}")]
    Persistence(String),

    /// A previous submission has not finished yet
    #[error("Design submission already in progress")]
    SubmissionInFlight,

    #[error("Unknown image {0}")]
    UnknownImage(ImageId),

    #[error("Unknown paper size '{0}'")]
    UnknownPaperSize(String),

    #[error("Invalid text colour '{0}', expected #RRGGBB")]
    InvalidColor(String),
}

impl StudioError {
    /// Failures the user can simply retry without redoing work
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StudioError::Persistence(_) | StudioError::SubmissionInFlight
        )
    }
}

impl From<StorageError> for StudioError {
    fn from(err: StorageError) -> Self {
        StudioError::Persistence(err.to_string())
    }
}

impl From<RecordError> for StudioError {
    fn from(err: RecordError) -> Self {
        StudioError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Persistence(format!("could not encode design: {}", err))
    }
}

pub type StudioResult<T> = Result<T, StudioError>;
