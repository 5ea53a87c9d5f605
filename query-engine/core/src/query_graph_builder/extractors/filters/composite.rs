use super::{expect_bool, extract_filter, unknown_filter_operation};
use crate::{
    constants::filters,
    query_document::{conversions, parse_composite_create, JsonMap, QueryParserResult, QueryPath},
    schema::IdentifierType,
};
use query_structure::{CompositeCompare, CompositeFieldRef, Filter, ParentContainer, PrismaValue};
use serde_json::Value;
use std::borrow::Cow;
use user_facing_errors::query_engine::validation::{ArgumentDescription, ValidationError};

const TO_MANY_OPERATIONS: &[&str] = &[
    filters::EQUALS,
    filters::EVERY,
    filters::SOME,
    filters::NONE,
    filters::IS_EMPTY,
    filters::IS_SET,
];

const TO_ONE_OPERATIONS: &[&str] = &[filters::EQUALS, filters::IS, filters::IS_NOT, filters::IS_SET];

/// Field is the composite field the filter is referring to, `value` the passed filter.
/// - List composites: an operation object (`every`, `some`, `none`, `isEmpty`, `equals`, `isSet`)
///   or a plain list for equality.
/// - Single composites: an operation object (`is`, `isNot`, `equals`, `isSet`), `null`, or
///   directly the object to filter with (implicit `is`).
pub(super) fn extract_composite_filters(
    field: &CompositeFieldRef,
    value: &Value,
    path: &QueryPath,
) -> QueryParserResult<Vec<Filter>> {
    match value {
        Value::Array(_) if field.is_list() => Ok(vec![field.equals(composite_value(field, value, path)?)]),
        Value::Object(filter_map) if field.is_list() => filter_map
            .iter()
            .map(|(key, value)| parse_to_many(key, value, field, &path.add(key.as_str())))
            .collect(),

        // Implicit `null` equality (`where: { <field>: null }`)
        Value::Null if !field.is_list() => Ok(vec![field.equals(PrismaValue::Null)]),
        Value::Object(filter_map) if !field.is_list() => {
            if is_operation_object(field, filter_map) {
                filter_map
                    .iter()
                    .map(|(key, value)| parse_to_one(key, value, field, &path.add(key.as_str())))
                    .collect()
            } else {
                Ok(vec![field.is(extract_filter(filter_map, &container(field), path)?)])
            }
        }

        other => Err(ValidationError::invalid_argument_type(
            path.segments(),
            ArgumentDescription::new(
                field.name.clone(),
                vec![Cow::Owned(composite_filter_type(field).to_string())],
            ),
            conversions::inferred_type_name(other),
        )
        .into()),
    }
}

fn parse_to_many(
    filter_key: &str,
    input: &Value,
    field: &CompositeFieldRef,
    path: &QueryPath,
) -> QueryParserResult<Filter> {
    match filter_key {
        filters::EVERY => Ok(field.every(nested_filter(field, input, path)?)),
        filters::SOME => Ok(field.some(nested_filter(field, input, path)?)),
        filters::NONE => Ok(field.none(nested_filter(field, input, path)?)),
        filters::IS_EMPTY => Ok(field.is_empty(expect_bool(input, path)?)),
        filters::EQUALS => Ok(field.equals(composite_value(field, input, path)?)),
        filters::IS_SET => Ok(field.is_set(expect_bool(input, path)?)),
        _ => Err(unknown_filter_operation(
            &composite_filter_type(field),
            TO_MANY_OPERATIONS,
            path,
        )),
    }
}

fn parse_to_one(
    filter_key: &str,
    input: &Value,
    field: &CompositeFieldRef,
    path: &QueryPath,
) -> QueryParserResult<Filter> {
    match (filter_key, input) {
        (filters::IS, Value::Null) => Ok(field.equals(PrismaValue::Null)),
        (filters::IS, input) => Ok(field.is(nested_filter(field, input, path)?)),
        (filters::IS_NOT, Value::Null) => Ok(Filter::not(vec![field.equals(PrismaValue::Null)])),
        (filters::IS_NOT, input) => Ok(field.is_not(nested_filter(field, input, path)?)),
        (filters::EQUALS, input) => Ok(field.equals(composite_value(field, input, path)?)),
        (filters::IS_SET, input) if field.is_optional() => Ok(field.is_set(expect_bool(input, path)?)),
        _ => Err(unknown_filter_operation(
            &composite_filter_type(field),
            TO_ONE_OPERATIONS,
            path,
        )),
    }
}

/// An object is read as filter operations only if all of its keys are operations and none of them
/// is a field of the composite type. Anything else is the implicit `is` form.
fn is_operation_object(field: &CompositeFieldRef, filter_map: &JsonMap) -> bool {
    !filter_map.is_empty()
        && filter_map
            .keys()
            .all(|key| TO_ONE_OPERATIONS.contains(&key.as_str()) && field.typ().find_field(key).is_none())
}

fn nested_filter(field: &CompositeFieldRef, input: &Value, path: &QueryPath) -> QueryParserResult<Filter> {
    match input {
        Value::Object(map) => extract_filter(map, &container(field), path),
        other => Err(ValidationError::invalid_argument_type(
            path.segments(),
            ArgumentDescription::new(
                path.last().unwrap_or_default().to_owned(),
                vec![Cow::Owned(
                    IdentifierType::WhereInput(field.typ().name.clone()).to_string(),
                )],
            ),
            conversions::inferred_type_name(other),
        )
        .into()),
    }
}

/// Values for composite equality are full composite create inputs. Lists accept a single object.
fn composite_value(field: &CompositeFieldRef, input: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    match input {
        Value::Null if !field.is_list() => Ok(PrismaValue::Null),
        Value::Array(values) if field.is_list() => values
            .iter()
            .map(|v| parse_composite_create(field.typ(), v, path))
            .collect::<QueryParserResult<Vec<_>>>()
            .map(PrismaValue::List),
        input if field.is_list() => Ok(PrismaValue::List(vec![parse_composite_create(field.typ(), input, path)?])),
        input => parse_composite_create(field.typ(), input, path),
    }
}

fn container(field: &CompositeFieldRef) -> ParentContainer {
    ParentContainer::CompositeType(field.typ().clone())
}

fn composite_filter_type(field: &CompositeFieldRef) -> IdentifierType {
    if field.is_list() {
        IdentifierType::ToManyCompositeFilterInput(field.typ().clone())
    } else {
        IdentifierType::ToOneCompositeFilterInput(field.typ().clone(), field.arity)
    }
}
