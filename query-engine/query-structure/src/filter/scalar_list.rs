use crate::ScalarFieldRef;
use prisma_value::PrismaValue;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarListFilter {
    pub field: ScalarFieldRef,
    pub condition: ScalarListCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarListCondition {
    /// List equals the given list, element by element.
    Equals(Vec<PrismaValue>),

    /// List contains the given value (`has`).
    Contains(PrismaValue),

    /// List contains all the given values (`hasEvery`).
    ContainsEvery(Vec<PrismaValue>),

    /// List contains some of the given values (`hasSome`).
    ContainsSome(Vec<PrismaValue>),

    /// List emptiness check.
    IsEmpty(bool),
}
