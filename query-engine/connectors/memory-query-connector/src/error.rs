use query_connector::error::{ConnectorError, ErrorKind};
use query_structure::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Unique constraint violated on {0}")]
    UniqueConstraintViolation(String),

    #[error("Failed to convert '{}' to '{}'.", from, to)]
    ConversionError { from: String, to: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    DomainError(#[from] DomainError),
}

impl MemoryError {
    pub fn into_connector_error(self) -> ConnectorError {
        match self {
            MemoryError::UniqueConstraintViolation(constraint) => {
                ConnectorError::from_kind(ErrorKind::UniqueConstraintViolation { constraint })
            }
            MemoryError::DomainError(err) => err.into(),
            err @ (MemoryError::ConversionError { .. } | MemoryError::UnsupportedOperation(_)) => {
                ConnectorError::from_kind(ErrorKind::ConversionError(err.to_string()))
            }
        }
    }
}

impl From<MemoryError> for ConnectorError {
    fn from(err: MemoryError) -> Self {
        err.into_connector_error()
    }
}
