use query_structure::DomainError;
use serde_json::json;
use std::borrow::Cow;
use thiserror::Error;
use user_facing_errors::KnownError;

#[derive(Debug, Error)]
#[error("{}", kind)]
pub struct ConnectorError {
    /// An optional error already rendered for users in case the query core does not handle it.
    pub user_facing_error: Option<KnownError>,
    /// The error information for internal use.
    pub kind: ErrorKind,
}

impl ConnectorError {
    pub fn from_kind(kind: ErrorKind) -> Self {
        let user_facing_error = match &kind {
            ErrorKind::UniqueConstraintViolation { constraint } => Some(KnownError {
                message: format!("Unique constraint failed on the {constraint}"),
                meta: json!({ "target": constraint }),
                error_code: Cow::Borrowed("P2002"),
            }),
            ErrorKind::ConversionError(message) => Some(KnownError {
                message: format!("Inconsistent column data: {message}"),
                meta: json!({ "message": message }),
                error_code: Cow::Borrowed("P2023"),
            }),
            ErrorKind::DomainError(_) => None,
        };

        ConnectorError { user_facing_error, kind }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("Unique constraint failed: {}", constraint)]
    UniqueConstraintViolation { constraint: String },

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("{}", _0)]
    DomainError(DomainError),
}

impl From<DomainError> for ConnectorError {
    fn from(e: DomainError) -> ConnectorError {
        ConnectorError::from_kind(ErrorKind::DomainError(e))
    }
}
