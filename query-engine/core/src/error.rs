use crate::QueryParserError;
use query_connector::error::ConnectorError;
use query_structure::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    QueryParserError(QueryParserError),

    #[error("Error in connector: {}", _0)]
    ConnectorError(ConnectorError),

    #[error("Error in domain logic: {}", _0)]
    DomainError(DomainError),

    #[error("Invalid request: {}", _0)]
    RequestError(String),

    #[error("{}", _0)]
    SerializationError(String),
}

// gradual json serialization. Default to a json string, equal to to_string (auto-implemented by
// fmt::Display)
impl Serialize for CoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl From<QueryParserError> for CoreError {
    fn from(e: QueryParserError) -> CoreError {
        CoreError::QueryParserError(e)
    }
}

impl From<ConnectorError> for CoreError {
    fn from(e: ConnectorError) -> CoreError {
        CoreError::ConnectorError(e)
    }
}

impl From<DomainError> for CoreError {
    fn from(e: DomainError) -> CoreError {
        CoreError::DomainError(e)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> CoreError {
        CoreError::SerializationError(e.to_string())
    }
}

impl From<CoreError> for user_facing_errors::Error {
    fn from(err: CoreError) -> user_facing_errors::Error {
        match err {
            CoreError::QueryParserError(err) => err.into_user_facing_error(),
            CoreError::ConnectorError(ConnectorError {
                user_facing_error: Some(user_facing_error),
                ..
            }) => user_facing_error.into(),
            _ => user_facing_errors::UnknownError::new(&err).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_facing_errors::query_engine::validation::ValidationError;

    #[test]
    fn validation_errors_become_known_errors() {
        let err = CoreError::from(QueryParserError::from(ValidationError::null_not_allowed(vec![
            "data", "contents",
        ])));

        let user_facing = user_facing_errors::Error::from(err);
        let known = user_facing.as_known().unwrap();

        assert_eq!(known.error_code, "P2009");
        assert_eq!(known.message, "Argument contents for data.contents must not be null");
    }

    #[test]
    fn other_errors_become_unknown_errors() {
        let err = CoreError::RequestError("unknown action".to_owned());
        let user_facing = user_facing_errors::Error::from(err);

        assert!(user_facing.as_known().is_none());
        assert_eq!(user_facing.message(), "Invalid request: unknown action");
    }
}
