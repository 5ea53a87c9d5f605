#![deny(rust_2018_idioms, unsafe_code)]

pub mod constants;
pub mod executor;
pub mod protocol;
pub mod query_graph_builder;
pub mod query_document;
pub mod schema;

mod error;

pub use error::*;
pub use executor::*;
pub use protocol::*;
pub use query_graph_builder::*;
pub use query_document::*;

pub type CoreResult<T> = Result<T, CoreError>;
