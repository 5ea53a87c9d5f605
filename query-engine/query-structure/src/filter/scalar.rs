use crate::ScalarFieldRef;
use prisma_value::PrismaValue;

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarFilter {
    pub field: ScalarFieldRef,
    pub condition: ScalarCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarCondition {
    Equals(PrismaValue),
    NotEquals(PrismaValue),
    Contains(PrismaValue),
    NotContains(PrismaValue),
    StartsWith(PrismaValue),
    NotStartsWith(PrismaValue),
    EndsWith(PrismaValue),
    NotEndsWith(PrismaValue),
    LessThan(PrismaValue),
    LessThanOrEquals(PrismaValue),
    GreaterThan(PrismaValue),
    GreaterThanOrEquals(PrismaValue),
    In(Vec<PrismaValue>),
    NotIn(Vec<PrismaValue>),
    IsSet(bool),
}

impl ScalarCondition {
    pub fn invert(self, condition: bool) -> Self {
        if condition {
            match self {
                Self::Equals(v) => Self::NotEquals(v),
                Self::NotEquals(v) => Self::Equals(v),
                Self::Contains(v) => Self::NotContains(v),
                Self::NotContains(v) => Self::Contains(v),
                Self::StartsWith(v) => Self::NotStartsWith(v),
                Self::NotStartsWith(v) => Self::StartsWith(v),
                Self::EndsWith(v) => Self::NotEndsWith(v),
                Self::NotEndsWith(v) => Self::EndsWith(v),
                Self::LessThan(v) => Self::GreaterThanOrEquals(v),
                Self::LessThanOrEquals(v) => Self::GreaterThan(v),
                Self::GreaterThan(v) => Self::LessThanOrEquals(v),
                Self::GreaterThanOrEquals(v) => Self::LessThan(v),
                Self::In(v) => Self::NotIn(v),
                Self::NotIn(v) => Self::In(v),
                Self::IsSet(v) => Self::IsSet(!v),
            }
        } else {
            self
        }
    }
}
