//! Validation of the raw, untyped arguments of a request against the data model.
//!
//! Arguments arrive as JSON. Every value is checked against the field it is given for and
//! converted into a `PrismaValue`; errors carry the argument path of the offending value.

mod error;
mod parser;

pub(crate) use error::conversions;
pub use error::*;
pub use parser::*;

use std::fmt;

/// Path of an argument inside a request, e.g. `data.contents.push`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPath {
    segments: Vec<String>,
}

impl QueryPath {
    pub fn new(initial_segment: impl Into<String>) -> Self {
        Self {
            segments: vec![initial_segment.into()],
        }
    }

    pub fn add(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.segments.push(segment.into());
        path
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

pub type ArgumentPath = QueryPath;
