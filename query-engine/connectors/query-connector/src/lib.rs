#![deny(warnings)]

pub mod error;

mod interface;

pub use interface::*;
pub use query_structure::{Filter, WriteArgs, WriteOperation};

pub type Result<T> = std::result::Result<T, error::ConnectorError>;
