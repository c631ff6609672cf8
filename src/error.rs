use crate::protocol::ValidationError;
use crate::services::write::WriteError;
use thiserror::Error;

/// Everything that can stop a submission. None of these are fatal:
/// the form stays usable and the user may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{body}")]
    WriteRejected { status: u16, body: String },
    #[error("Network error")]
    NetworkUnavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingMeasurement,
    NoFields,
    WriteRejected,
    NetworkUnavailable,
}

impl EntryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EntryError::Invalid(ValidationError::MissingMeasurement) => ErrorKind::MissingMeasurement,
            EntryError::Invalid(ValidationError::NoFields) => ErrorKind::NoFields,
            EntryError::WriteRejected { .. } => ErrorKind::WriteRejected,
            EntryError::NetworkUnavailable(_) => ErrorKind::NetworkUnavailable,
        }
    }

    /// Validation failures are shown next to an input; write failures are not.
    pub fn is_validation(&self) -> bool {
        matches!(self, EntryError::Invalid(_))
    }
}

impl From<WriteError> for EntryError {
    fn from(e: WriteError) -> Self {
        match e {
            WriteError::Rejected { status, body } => EntryError::WriteRejected { status, body },
            WriteError::Network(detail) => EntryError::NetworkUnavailable(detail),
        }
    }
}
