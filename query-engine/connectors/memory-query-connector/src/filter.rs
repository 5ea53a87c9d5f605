use crate::document::get;
use prisma_value::PrismaValue;
use query_structure::{
    CompositeCondition, CompositeFilter, Filter, ScalarCondition, ScalarFilter, ScalarListCondition, ScalarListFilter,
};
use std::cmp::Ordering;

/// Evaluates a filter against a record or an embedded document.
pub(crate) fn matches(filter: &Filter, doc: &[(String, PrismaValue)]) -> bool {
    match filter {
        Filter::And(filters) => filters.iter().all(|f| matches(f, doc)),
        Filter::Or(filters) => filters.iter().any(|f| matches(f, doc)),
        Filter::Not(filters) => filters.iter().all(|f| !matches(f, doc)),
        Filter::Scalar(sf) => matches_scalar(sf, doc),
        Filter::ScalarList(slf) => matches_scalar_list(slf, doc),
        Filter::Composite(cf) => matches_composite(cf, doc),
        Filter::BoolFilter(b) => *b,
        Filter::Empty => true,
    }
}

fn matches_scalar(filter: &ScalarFilter, doc: &[(String, PrismaValue)]) -> bool {
    let value = get(doc, &filter.field.name);

    match &filter.condition {
        ScalarCondition::IsSet(b) => value.is_some() == *b,
        ScalarCondition::Equals(expected) => values_equal(value.unwrap_or(&PrismaValue::Null), expected),
        ScalarCondition::NotEquals(expected) => !values_equal(value.unwrap_or(&PrismaValue::Null), expected),
        ScalarCondition::In(values) => {
            let value = value.unwrap_or(&PrismaValue::Null);
            values.iter().any(|v| values_equal(value, v))
        }
        ScalarCondition::NotIn(values) => {
            let value = value.unwrap_or(&PrismaValue::Null);
            !values.iter().any(|v| values_equal(value, v))
        }
        ScalarCondition::Contains(needle) => string_test(value, needle, |h, n| h.contains(n)),
        ScalarCondition::NotContains(needle) => !string_test(value, needle, |h, n| h.contains(n)),
        ScalarCondition::StartsWith(needle) => string_test(value, needle, |h, n| h.starts_with(n)),
        ScalarCondition::NotStartsWith(needle) => !string_test(value, needle, |h, n| h.starts_with(n)),
        ScalarCondition::EndsWith(needle) => string_test(value, needle, |h, n| h.ends_with(n)),
        ScalarCondition::NotEndsWith(needle) => !string_test(value, needle, |h, n| h.ends_with(n)),
        ScalarCondition::LessThan(bound) => compare(value, bound) == Some(Ordering::Less),
        ScalarCondition::LessThanOrEquals(bound) => {
            matches!(compare(value, bound), Some(Ordering::Less | Ordering::Equal))
        }
        ScalarCondition::GreaterThan(bound) => compare(value, bound) == Some(Ordering::Greater),
        ScalarCondition::GreaterThanOrEquals(bound) => {
            matches!(compare(value, bound), Some(Ordering::Greater | Ordering::Equal))
        }
    }
}

fn matches_scalar_list(filter: &ScalarListFilter, doc: &[(String, PrismaValue)]) -> bool {
    let list = match get(doc, &filter.field.name) {
        Some(PrismaValue::List(list)) => list.as_slice(),
        _ => &[],
    };

    let has = |needle: &PrismaValue| list.iter().any(|v| values_equal(v, needle));

    match &filter.condition {
        ScalarListCondition::Equals(values) => {
            list.len() == values.len() && list.iter().zip(values).all(|(a, b)| values_equal(a, b))
        }
        ScalarListCondition::Contains(needle) => has(needle),
        ScalarListCondition::ContainsEvery(needles) => needles.iter().all(has),
        ScalarListCondition::ContainsSome(needles) => needles.iter().any(has),
        ScalarListCondition::IsEmpty(b) => list.is_empty() == *b,
    }
}

fn matches_composite(filter: &CompositeFilter, doc: &[(String, PrismaValue)]) -> bool {
    let value = get(doc, &filter.field.name);

    let elements = || match value {
        Some(PrismaValue::List(list)) => list.as_slice(),
        _ => &[],
    };

    let element_matches = |filter: &Filter, element: &PrismaValue| match element {
        PrismaValue::Object(obj) => matches(filter, obj),
        _ => false,
    };

    match filter.condition.as_ref() {
        CompositeCondition::Every(f) => elements().iter().all(|e| element_matches(f, e)),
        CompositeCondition::Some(f) => elements().iter().any(|e| element_matches(f, e)),
        CompositeCondition::None(f) => !elements().iter().any(|e| element_matches(f, e)),
        CompositeCondition::Empty(b) => elements().is_empty() == *b,
        CompositeCondition::Is(f) => value.map(|v| element_matches(f, v)).unwrap_or(false),
        CompositeCondition::IsNot(f) => !value.map(|v| element_matches(f, v)).unwrap_or(false),
        CompositeCondition::Equals(expected) => values_equal(value.unwrap_or(&PrismaValue::Null), expected),
        CompositeCondition::IsSet(b) => value.is_some() == *b,
    }
}

fn string_test(value: Option<&PrismaValue>, needle: &PrismaValue, test: impl Fn(&str, &str) -> bool) -> bool {
    match (value, needle) {
        (Some(PrismaValue::String(haystack)), PrismaValue::String(needle)) => test(haystack, needle),
        _ => false,
    }
}

/// Orders comparable values. Numbers of different representations compare by their numeric value.
fn compare(value: Option<&PrismaValue>, bound: &PrismaValue) -> Option<Ordering> {
    let value = value?;

    if value.is_numeric() && bound.is_numeric() {
        return Some(value.as_decimal()?.cmp(&bound.as_decimal()?));
    }

    match (value, bound) {
        (PrismaValue::String(a), PrismaValue::String(b)) => Some(a.cmp(b)),
        (PrismaValue::DateTime(a), PrismaValue::DateTime(b)) => Some(a.cmp(b)),
        (PrismaValue::Boolean(a), PrismaValue::Boolean(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Structural equality where numbers compare by numeric value.
pub(crate) fn values_equal(a: &PrismaValue, b: &PrismaValue) -> bool {
    match (a, b) {
        (a, b) if a.is_numeric() && b.is_numeric() => a.as_decimal() == b.as_decimal(),
        (PrismaValue::List(a), PrismaValue::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (PrismaValue::Object(a), PrismaValue::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, v)| get(b, k).map(|other| values_equal(v, other)).unwrap_or(false))
        }
        (a, b) => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_structure::*;
    use std::sync::Arc;

    fn scalar(name: &str, type_identifier: TypeIdentifier, arity: FieldArity) -> ScalarFieldRef {
        Arc::new(ScalarField {
            name: name.to_owned(),
            type_identifier,
            arity,
            is_id: false,
            internal_enum: None,
            default_value: None,
        })
    }

    fn doc(pairs: Vec<(&str, PrismaValue)>) -> Vec<(String, PrismaValue)> {
        pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
    }

    #[test]
    fn numbers_compare_across_representations() {
        let count = scalar("count", TypeIdentifier::Float, FieldArity::Required);
        let d = doc(vec![("count", PrismaValue::try_from(2.0).unwrap())]);

        assert!(matches(&count.equals(2), &d));
        assert!(matches(&count.condition(ScalarCondition::LessThan(PrismaValue::Int(3))), &d));
        assert!(!matches(&count.condition(ScalarCondition::GreaterThan(PrismaValue::Int(3))), &d));
    }

    #[test]
    fn not_requires_every_filter_to_fail() {
        let name = scalar("name", TypeIdentifier::String, FieldArity::Required);
        let d = doc(vec![("name", "a".into())]);

        assert!(!matches(&Filter::not(vec![name.equals("a"), name.equals("b")]), &d));
        assert!(matches(&Filter::not(vec![name.equals("b"), name.equals("c")]), &d));
        assert!(!matches(&Filter::or(vec![]), &d));
        assert!(matches(&Filter::and(vec![]), &d));
    }

    #[test]
    fn missing_fields_are_not_set() {
        let country = scalar("country", TypeIdentifier::String, FieldArity::Optional);
        let d = doc(vec![]);

        assert!(matches(&country.condition(ScalarCondition::IsSet(false)), &d));
        assert!(matches(&country.equals(PrismaValue::Null), &d));
        assert!(!matches(&country.condition(ScalarCondition::StartsWith("a".into())), &d));
    }

    #[test]
    fn scalar_list_conditions() {
        let tags = scalar("tags", TypeIdentifier::String, FieldArity::List);
        let d = doc(vec![("tags", PrismaValue::List(vec!["a".into(), "b".into()]))]);

        assert!(matches(&tags.list_condition(ScalarListCondition::Contains("a".into())), &d));
        assert!(matches(
            &tags.list_condition(ScalarListCondition::ContainsEvery(vec!["a".into(), "b".into()])),
            &d
        ));
        assert!(!matches(
            &tags.list_condition(ScalarListCondition::ContainsSome(vec!["c".into()])),
            &d
        ));
        assert!(matches(&tags.is_empty_list(false), &d));
        assert!(matches(&tags.is_empty_list(true), &doc(vec![])));
    }
}
