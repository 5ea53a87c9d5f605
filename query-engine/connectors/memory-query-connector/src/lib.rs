//! A document store keeping every model's records in memory. Records are objects whose
//! composite fields are nested objects, so composite list operations work on the stored
//! documents the way a document database would apply them.

mod connection;
mod connector;
mod document;
mod error;
mod filter;
mod update;

pub use connection::MemoryConnection;
pub use connector::MemoryConnector;
pub use error::MemoryError;

type Result<T> = std::result::Result<T, MemoryError>;
