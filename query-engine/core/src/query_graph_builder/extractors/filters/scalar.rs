use super::{expect_bool, unknown_filter_operation};
use crate::{
    constants::filters,
    query_document::{conversions, parse_scalar_value, QueryParserResult, QueryPath},
    schema::IdentifierType,
};
use query_structure::{Filter, PrismaValue, ScalarCompare, ScalarCondition, ScalarFieldRef, ScalarListCompare, ScalarListCondition};
use serde_json::Value;
use user_facing_errors::query_engine::validation::ValidationError;

const SCALAR_OPERATIONS: &[&str] = &[
    filters::EQUALS,
    filters::NOT_LOWERCASE,
    filters::IN,
    filters::NOT_IN,
    filters::LOWER_THAN,
    filters::LOWER_THAN_OR_EQUAL,
    filters::GREATER_THAN,
    filters::GREATER_THAN_OR_EQUAL,
    filters::CONTAINS,
    filters::STARTS_WITH,
    filters::ENDS_WITH,
    filters::IS_SET,
];

const SCALAR_LIST_OPERATIONS: &[&str] = &[
    filters::EQUALS,
    filters::HAS,
    filters::HAS_EVERY,
    filters::HAS_SOME,
    filters::IS_EMPTY,
];

/// Field is the field the filter is referring to and `value` is the passed filter. E.g. `where: { <field>: <value> }`.
/// `value` can be either a flat scalar (for shorthand filter notation) or an object (full filter syntax).
pub(super) fn extract_scalar_filters(
    field: &ScalarFieldRef,
    value: &Value,
    path: &QueryPath,
) -> QueryParserResult<Vec<Filter>> {
    match value {
        Value::Object(filter_map) => parse(filter_map, field, path, false),
        Value::Array(_) if field.is_list() => Ok(vec![field.list_condition(ScalarListCondition::Equals(
            as_value_list(field, value, path)?,
        ))]),
        value => Ok(vec![field.equals(as_filter_value(field, value, path)?)]),
    }
}

#[tracing::instrument(name = "parse_scalar_field", skip(filter_map, path, reverse))]
fn parse(
    filter_map: &serde_json::Map<String, Value>,
    field: &ScalarFieldRef,
    path: &QueryPath,
    reverse: bool,
) -> QueryParserResult<Vec<Filter>> {
    let filters = filter_map
        .iter()
        .map(|(key, value)| {
            let path = path.add(key.as_str());

            if field.is_list() {
                parse_scalar_list(key, value, field, &path)
            } else {
                parse_scalar(key, value, field, &path, reverse)
            }
        })
        .collect::<QueryParserResult<Vec<Vec<_>>>>()?
        .into_iter()
        .flatten()
        .collect();

    Ok(filters)
}

fn parse_scalar(
    filter_key: &str,
    input: &Value,
    field: &ScalarFieldRef,
    path: &QueryPath,
    reverse: bool,
) -> QueryParserResult<Vec<Filter>> {
    let condition = match filter_key {
        filters::NOT_LOWERCASE => match input {
            // Support for syntax `{ scalarField: { not: { equals: <value> } } }`
            Value::Object(inner) => return parse(inner, field, path, !reverse),

            // Support for syntax `{ scalarField: { not: <value> } }`
            value => ScalarCondition::NotEquals(as_filter_value(field, value, path)?),
        },
        filters::EQUALS => ScalarCondition::Equals(as_filter_value(field, input, path)?),
        filters::IN => ScalarCondition::In(as_value_list(field, input, path)?),
        filters::NOT_IN => ScalarCondition::NotIn(as_value_list(field, input, path)?),
        filters::LOWER_THAN => ScalarCondition::LessThan(as_filter_value(field, input, path)?),
        filters::LOWER_THAN_OR_EQUAL => ScalarCondition::LessThanOrEquals(as_filter_value(field, input, path)?),
        filters::GREATER_THAN => ScalarCondition::GreaterThan(as_filter_value(field, input, path)?),
        filters::GREATER_THAN_OR_EQUAL => ScalarCondition::GreaterThanOrEquals(as_filter_value(field, input, path)?),
        filters::CONTAINS => ScalarCondition::Contains(as_filter_value(field, input, path)?),
        filters::STARTS_WITH => ScalarCondition::StartsWith(as_filter_value(field, input, path)?),
        filters::ENDS_WITH => ScalarCondition::EndsWith(as_filter_value(field, input, path)?),
        filters::IS_SET if field.is_optional() => ScalarCondition::IsSet(expect_bool(input, path)?),
        _ => {
            return Err(unknown_filter_operation(
                &scalar_filter_type(field),
                SCALAR_OPERATIONS,
                path,
            ))
        }
    };

    Ok(vec![field.condition(condition.invert(reverse))])
}

fn parse_scalar_list(
    filter_key: &str,
    input: &Value,
    field: &ScalarFieldRef,
    path: &QueryPath,
) -> QueryParserResult<Vec<Filter>> {
    let condition = match filter_key {
        filters::EQUALS => ScalarListCondition::Equals(as_value_list(field, input, path)?),
        filters::HAS => ScalarListCondition::Contains(as_filter_value(field, input, path)?),
        filters::HAS_EVERY => ScalarListCondition::ContainsEvery(as_value_list(field, input, path)?),
        filters::HAS_SOME => ScalarListCondition::ContainsSome(as_value_list(field, input, path)?),
        filters::IS_EMPTY => ScalarListCondition::IsEmpty(expect_bool(input, path)?),
        _ => {
            return Err(unknown_filter_operation(
                &scalar_filter_type(field),
                SCALAR_LIST_OPERATIONS,
                path,
            ))
        }
    };

    Ok(vec![field.list_condition(condition)])
}

fn scalar_filter_type(field: &ScalarFieldRef) -> IdentifierType {
    let nullable = if field.is_optional() { "Nullable" } else { "" };
    let list = if field.is_list() { "List" } else { "" };

    IdentifierType::Raw(format!("{}{nullable}{list}Filter", field.type_identifier))
}

/// Filter values are validated against the field type, `null` compares against absent values.
fn as_filter_value(field: &ScalarFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    match value {
        Value::Null => Ok(PrismaValue::Null),
        value => parse_scalar_value(field, value, path),
    }
}

fn as_value_list(field: &ScalarFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<Vec<PrismaValue>> {
    match value {
        Value::Array(values) => values.iter().map(|v| as_filter_value(field, v, path)).collect(),
        other => Err(ValidationError::invalid_argument_type(
            path.segments(),
            conversions::scalar_field_to_argument_description(field),
            conversions::inferred_type_name(other),
        )
        .into()),
    }
}
