use crate::{CompositeFieldRef, Filter};
use prisma_value::PrismaValue;

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeFilter {
    /// Starting field of the composite filter.
    pub field: CompositeFieldRef,

    /// Condition the filter checks.
    pub condition: Box<CompositeCondition>,
}

impl CompositeFilter {
    pub fn new(field: CompositeFieldRef, condition: CompositeCondition) -> Self {
        Self {
            field,
            condition: Box::new(condition),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompositeCondition {
    /// Every element of a list composite matches the filter.
    Every(Filter),

    /// At least one element of a list composite matches the filter.
    Some(Filter),

    /// No element of a list composite matches the filter.
    None(Filter),

    /// Checks whether a list composite is empty or not.
    Empty(bool),

    /// Single composite matches the filter.
    Is(Filter),

    /// Single composite does not match the filter.
    IsNot(Filter),

    /// Entire composite equals the given value.
    Equals(PrismaValue),

    /// Composite field is present in the document.
    IsSet(bool),
}
