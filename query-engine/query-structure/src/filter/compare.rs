use super::*;
use crate::{CompositeFieldRef, ScalarFieldRef};
use prisma_value::PrismaValue;

/// Comparing methods for scalar fields.
pub trait ScalarCompare {
    fn equals<T>(&self, val: T) -> Filter
    where
        T: Into<PrismaValue>;

    fn not_equals<T>(&self, val: T) -> Filter
    where
        T: Into<PrismaValue>;

    fn is_in<T>(&self, vals: Vec<T>) -> Filter
    where
        T: Into<PrismaValue>;

    fn condition(&self, condition: ScalarCondition) -> Filter;
}

impl ScalarCompare for ScalarFieldRef {
    fn equals<T>(&self, val: T) -> Filter
    where
        T: Into<PrismaValue>,
    {
        self.condition(ScalarCondition::Equals(val.into()))
    }

    fn not_equals<T>(&self, val: T) -> Filter
    where
        T: Into<PrismaValue>,
    {
        self.condition(ScalarCondition::NotEquals(val.into()))
    }

    fn is_in<T>(&self, vals: Vec<T>) -> Filter
    where
        T: Into<PrismaValue>,
    {
        self.condition(ScalarCondition::In(vals.into_iter().map(Into::into).collect()))
    }

    fn condition(&self, condition: ScalarCondition) -> Filter {
        Filter::from(ScalarFilter {
            field: self.clone(),
            condition,
        })
    }
}

/// List-specific comparing methods for scalar list fields.
pub trait ScalarListCompare {
    fn list_condition(&self, condition: ScalarListCondition) -> Filter;

    fn is_empty_list(&self, b: bool) -> Filter {
        self.list_condition(ScalarListCondition::IsEmpty(b))
    }
}

impl ScalarListCompare for ScalarFieldRef {
    fn list_condition(&self, condition: ScalarListCondition) -> Filter {
        Filter::from(ScalarListFilter {
            field: self.clone(),
            condition,
        })
    }
}

/// Comparison methods for composite fields.
pub trait CompositeCompare {
    fn every<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>;

    fn some<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>;

    fn none<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>;

    fn is<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>;

    fn is_not<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>;

    fn is_empty(&self, b: bool) -> Filter;

    fn equals(&self, val: PrismaValue) -> Filter;

    fn is_set(&self, b: bool) -> Filter;
}

impl CompositeCompare for CompositeFieldRef {
    fn every<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>,
    {
        CompositeFilter::new(self.clone(), CompositeCondition::Every(filter.into())).into()
    }

    fn some<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>,
    {
        CompositeFilter::new(self.clone(), CompositeCondition::Some(filter.into())).into()
    }

    fn none<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>,
    {
        CompositeFilter::new(self.clone(), CompositeCondition::None(filter.into())).into()
    }

    fn is<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>,
    {
        CompositeFilter::new(self.clone(), CompositeCondition::Is(filter.into())).into()
    }

    fn is_not<T>(&self, filter: T) -> Filter
    where
        T: Into<Filter>,
    {
        CompositeFilter::new(self.clone(), CompositeCondition::IsNot(filter.into())).into()
    }

    fn is_empty(&self, b: bool) -> Filter {
        CompositeFilter::new(self.clone(), CompositeCondition::Empty(b)).into()
    }

    fn equals(&self, val: PrismaValue) -> Filter {
        CompositeFilter::new(self.clone(), CompositeCondition::Equals(val)).into()
    }

    fn is_set(&self, b: bool) -> Filter {
        CompositeFilter::new(self.clone(), CompositeCondition::IsSet(b)).into()
    }
}
