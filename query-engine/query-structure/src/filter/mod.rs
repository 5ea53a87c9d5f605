//! Filters are structured as a tree of conditions over a model or a composite type.
//! Connectors evaluate them, the query core only builds them.

mod compare;
mod composite;
mod scalar;
mod scalar_list;

pub use compare::*;
pub use composite::*;
pub use scalar::*;
pub use scalar_list::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Vec<Filter>),
    Scalar(ScalarFilter),
    ScalarList(ScalarListFilter),
    Composite(CompositeFilter),
    BoolFilter(bool),
    Empty,
}

impl Filter {
    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or(filters)
    }

    pub fn not(filters: Vec<Filter>) -> Self {
        Filter::Not(filters)
    }

    pub fn empty() -> Self {
        Filter::Empty
    }

    /// Returns the number of direct and nested conditions.
    pub fn size(&self) -> usize {
        match self {
            Self::And(v) | Self::Or(v) | Self::Not(v) => v.iter().map(Filter::size).sum(),
            Self::Empty => 0,
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::Empty)
    }
}

impl From<ScalarFilter> for Filter {
    fn from(sf: ScalarFilter) -> Self {
        Filter::Scalar(sf)
    }
}

impl From<ScalarListFilter> for Filter {
    fn from(sf: ScalarListFilter) -> Self {
        Filter::ScalarList(sf)
    }
}

impl From<CompositeFilter> for Filter {
    fn from(cf: CompositeFilter) -> Self {
        Filter::Composite(cf)
    }
}

impl From<bool> for Filter {
    fn from(b: bool) -> Self {
        Filter::BoolFilter(b)
    }
}
