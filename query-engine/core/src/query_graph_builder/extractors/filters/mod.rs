mod composite;
mod filter_grouping;
mod scalar;

use crate::{
    query_document::{conversions, JsonMap, QueryParserResult, QueryPath},
    schema::IdentifierType,
};
use filter_grouping::*;
use query_structure::{Field, Filter, ParentContainer};
use serde_json::Value;
use std::{borrow::Cow, str::FromStr};
use user_facing_errors::query_engine::validation::{
    ArgumentDescription, InputTypeDescription, InputTypeDescriptionField, ValidationError,
};

/// Extracts a regular filter potentially matching many records (or list elements, when the
/// container is a composite type).
pub fn extract_filter(value_map: &JsonMap, container: &ParentContainer, path: &QueryPath) -> QueryParserResult<Filter> {
    let filters = value_map
        .iter()
        .map(|(key, value)| {
            let path = path.add(key.as_str());

            // 2 possibilities: Either a filter group (and, or, not) with a vector/object, or a field name with a filter object behind.
            if let Ok(nested) = FilterGrouping::from_str(key) {
                let value: QueryParserResult<Vec<Filter>> = match value {
                    Value::Array(values) => values
                        .iter()
                        .map(|val| extract_filter(expect_object(val, container, &path)?, container, &path))
                        .collect(),

                    // Single map to vec coercion
                    Value::Object(map) => extract_filter(map, container, &path).map(|res| vec![res]),

                    other => Err(invalid_where_input(container, other, &path)),
                };

                value.map(|value| match nested {
                    FilterGrouping::And => Filter::and(value),
                    FilterGrouping::Or => Filter::or(value),
                    FilterGrouping::Not => Filter::not(value),
                })
            } else {
                let field = container
                    .find_field(key)
                    .ok_or_else(|| unknown_field(container, &path))?;

                let filters = match field {
                    Field::Scalar(sf) => scalar::extract_scalar_filters(sf, value, &path),
                    Field::Composite(cf) => composite::extract_composite_filters(cf, value, &path),
                }?;

                Ok(Filter::And(filters))
            }
        })
        .collect::<QueryParserResult<Vec<Filter>>>()?;

    Ok(Filter::and(filters))
}

fn expect_object<'a>(value: &'a Value, container: &ParentContainer, path: &QueryPath) -> QueryParserResult<&'a JsonMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(invalid_where_input(container, other, path)),
    }
}

pub(crate) fn expect_bool(value: &Value, path: &QueryPath) -> QueryParserResult<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(ValidationError::invalid_argument_type(
            path.segments(),
            ArgumentDescription::new(path.last().unwrap_or_default().to_owned(), vec![Cow::Borrowed("Boolean")]),
            conversions::inferred_type_name(other),
        )
        .into()),
    }
}

fn where_input_type(container: &ParentContainer) -> IdentifierType {
    IdentifierType::WhereInput(container.name().to_owned())
}

fn invalid_where_input(container: &ParentContainer, value: &Value, path: &QueryPath) -> crate::QueryParserError {
    let type_name = where_input_type(container).to_string();

    ValidationError::invalid_argument_type(
        path.segments(),
        ArgumentDescription::new(
            path.last().unwrap_or_default().to_owned(),
            vec![Cow::Owned(type_name.clone()), Cow::Owned(format!("{type_name}[]"))],
        ),
        conversions::inferred_type_name(value),
    )
    .into()
}

fn unknown_field(container: &ParentContainer, path: &QueryPath) -> crate::QueryParserError {
    ValidationError::unknown_input_field(
        path.segments(),
        conversions::fields_to_input_type_description(&where_input_type(container), container.fields()),
    )
    .into()
}

/// An unknown operation inside a field filter object, e.g. `where: { upvotes: { hasNone: true } }`.
pub(crate) fn unknown_filter_operation(
    filter_type: &IdentifierType,
    operations: &[&str],
    path: &QueryPath,
) -> crate::QueryParserError {
    let fields = operations
        .iter()
        .map(|op| InputTypeDescriptionField::new((*op).to_owned(), Vec::new(), false))
        .collect();

    ValidationError::unknown_input_field(
        path.segments(),
        InputTypeDescription::new_object(filter_type.to_string(), fields),
    )
    .into()
}
