use super::{conversions, QueryParserResult, QueryPath};
use bigdecimal::BigDecimal;
use prisma_value::PrismaValue;
use query_structure::{CompositeFieldRef, CompositeTypeRef, Field, ScalarFieldRef, TypeIdentifier};
use serde_json::Value;
use std::{borrow::Cow, str::FromStr};
use user_facing_errors::query_engine::validation::{ArgumentDescription, InputTypeDescription, ValidationError};

pub type JsonMap = serde_json::Map<String, Value>;

/// Validates a composite create input (the payload of `set`, `push` and the shorthand forms) and
/// converts it into a `PrismaValue::Object`.
///
/// The output follows the declaration order of the composite type, not the input order, so that
/// equivalent inputs always translate to equal values. Missing fields get their default, lists
/// default to `[]`, optional fields are omitted.
pub fn parse_composite_create(typ: &CompositeTypeRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError::invalid_argument_type(
                path.segments(),
                ArgumentDescription::new(
                    path.last().unwrap_or_default().to_owned(),
                    vec![Cow::Owned(format!("{}CreateInput", typ.name))],
                ),
                conversions::inferred_type_name(other),
            )
            .into())
        }
    };

    let fields = parse_create_fields(typ.fields(), map, path, || {
        conversions::composite_create_input_description(typ)
    })?;

    Ok(PrismaValue::Object(fields))
}

/// Validates the fields of a create input object against `fields`, returning the values in
/// declaration order. `describe` renders the enclosing input type for errors.
pub fn parse_create_fields(
    fields: &[Field],
    map: &JsonMap,
    path: &QueryPath,
    describe: impl Fn() -> InputTypeDescription,
) -> QueryParserResult<Vec<(String, PrismaValue)>> {
    if let Some(unknown) = map.keys().find(|key| !fields.iter().any(|f| f.name() == key.as_str())) {
        return Err(ValidationError::unknown_input_field(path.add(unknown.as_str()).segments(), describe()).into());
    }

    let mut pairs = Vec::with_capacity(fields.len());

    for field in fields {
        let field_path = path.add(field.name());

        let value = match (map.get(field.name()), field) {
            (Some(value), Field::Scalar(sf)) => Some(parse_scalar(sf, value, &field_path)?),
            (Some(value), Field::Composite(cf)) => Some(parse_composite_field(cf, value, &field_path)?),
            (None, Field::Scalar(sf)) if sf.default_value().is_some() => sf.default_value().cloned(),
            (None, field) if field.is_list() => Some(PrismaValue::List(Vec::new())),
            (None, field) if field.is_required() => {
                return Err(ValidationError::required_argument_missing(field_path.segments(), &describe()).into())
            }
            (None, _) => None,
        };

        if let Some(value) = value {
            pairs.push((field.name().to_owned(), value));
        }
    }

    Ok(pairs)
}

/// A composite field inside a create input. Accepts the plain value or a `{ set: <value> }` create
/// envelope. A single object given to a list field becomes a one-element list.
pub fn parse_composite_field(cf: &CompositeFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    if let Some(inner) = create_envelope_value(cf, value) {
        return parse_composite_field(cf, inner, &path.add("set"));
    }

    match value {
        Value::Null if cf.is_nullable() => Ok(PrismaValue::Null),
        Value::Null => Err(ValidationError::null_not_allowed(path.segments()).into()),
        Value::Array(elements) if cf.is_list() => elements
            .iter()
            .map(|element| parse_composite_create(cf.typ(), element, path))
            .collect::<QueryParserResult<Vec<_>>>()
            .map(PrismaValue::List),
        value if cf.is_list() => Ok(PrismaValue::List(vec![parse_composite_create(cf.typ(), value, path)?])),
        value => parse_composite_create(cf.typ(), value, path),
    }
}

/// `{ set: x }` is a create envelope unless `set` is an actual field of the composite type.
fn create_envelope_value<'a>(cf: &CompositeFieldRef, value: &'a Value) -> Option<&'a Value> {
    match value {
        Value::Object(map) if map.len() == 1 && cf.typ().find_field("set").is_none() => map.get("set"),
        _ => None,
    }
}

/// Parses the value of a scalar field. Lists accept a sequence or a single element.
pub fn parse_scalar(sf: &ScalarFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    match value {
        Value::Null if sf.is_optional() => Ok(PrismaValue::Null),
        Value::Null => Err(ValidationError::null_not_allowed(path.segments()).into()),
        Value::Array(elements) if sf.is_list() => elements
            .iter()
            .map(|element| parse_scalar_value(sf, element, path))
            .collect::<QueryParserResult<Vec<_>>>()
            .map(PrismaValue::List),
        value if sf.is_list() => Ok(PrismaValue::List(vec![parse_scalar_value(sf, value, path)?])),
        value => parse_scalar_value(sf, value, path),
    }
}

/// Parses a single, non-list value against the type of `sf`.
pub fn parse_scalar_value(sf: &ScalarFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    let invalid_type = || -> QueryParserResult<PrismaValue> {
        Err(ValidationError::invalid_argument_type(
            path.segments(),
            conversions::scalar_field_to_argument_description(sf),
            conversions::inferred_type_name(value),
        )
        .into())
    };

    let invalid_value = |raw: String, underlying: Option<Box<dyn std::error::Error>>| -> QueryParserResult<PrismaValue> {
        Err(ValidationError::invalid_argument_value(
            path.segments(),
            raw,
            &sf.type_identifier.to_string(),
            underlying,
        )
        .into())
    };

    match (&sf.type_identifier, value) {
        (TypeIdentifier::String, Value::String(s)) => Ok(PrismaValue::String(s.clone())),
        (TypeIdentifier::Boolean, Value::Bool(b)) => Ok(PrismaValue::Boolean(*b)),
        (TypeIdentifier::Int, Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(PrismaValue::Int(i)),
            None => invalid_type(),
        },
        (TypeIdentifier::BigInt, Value::Number(n)) => match n.as_i64() {
            Some(i) => Ok(PrismaValue::BigInt(i)),
            None => invalid_type(),
        },
        (TypeIdentifier::BigInt, Value::String(s)) => match s.parse::<i64>() {
            Ok(i) => Ok(PrismaValue::BigInt(i)),
            Err(err) => invalid_value(s.clone(), Some(err.into())),
        },
        (TypeIdentifier::Float, Value::Number(n)) => match BigDecimal::from_str(&n.to_string()) {
            Ok(dec) => Ok(PrismaValue::Float(dec)),
            Err(err) => invalid_value(n.to_string(), Some(err.into())),
        },
        (TypeIdentifier::DateTime, Value::String(s)) => match prisma_value::parse_datetime(s) {
            Ok(dt) => Ok(PrismaValue::DateTime(dt)),
            Err(err) => invalid_value(s.clone(), Some(err.into())),
        },
        (TypeIdentifier::Enum(_), Value::String(s)) => match &sf.internal_enum {
            Some(e) if e.contains(s) => Ok(PrismaValue::Enum(s.clone())),
            _ => invalid_value(s.clone(), None),
        },
        (TypeIdentifier::Json, value) => Ok(PrismaValue::Json(value.to_string())),
        _ => invalid_type(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use query_structure::{
        CompositeTypeBuilder, FieldArity, InternalDataModelBuilder, InternalEnum, ModelBuilder, ScalarFieldBuilder,
    };
    use serde_json::json;

    fn content_type() -> query_structure::CompositeTypeRef {
        let dm = InternalDataModelBuilder::new()
            .model(ModelBuilder::new("Comment").field(ScalarFieldBuilder::new("id", TypeIdentifier::String, FieldArity::Required).id()))
            .composite_type(
                CompositeTypeBuilder::new("CommentContent")
                    .scalar("text", TypeIdentifier::String, FieldArity::Required)
                    .field(
                        ScalarFieldBuilder::new("likes", TypeIdentifier::Int, FieldArity::Required).default_value(0i64),
                    )
                    .scalar("postedAt", TypeIdentifier::DateTime, FieldArity::Optional)
                    .scalar("mood", TypeIdentifier::Enum("Mood".to_owned()), FieldArity::Optional)
                    .composite("upvotes", FieldArity::List, "CommentContentUpvotes"),
            )
            .composite_type(
                CompositeTypeBuilder::new("CommentContentUpvotes")
                    .scalar("vote", TypeIdentifier::Boolean, FieldArity::Required)
                    .scalar("userId", TypeIdentifier::String, FieldArity::Required),
            )
            .enumeration(InternalEnum::new("Mood", ["HAPPY", "SAD"]))
            .build()
            .unwrap();

        dm.find_composite_type("CommentContent").unwrap()
    }

    fn parse(value: serde_json::Value) -> QueryParserResult<PrismaValue> {
        parse_composite_create(&content_type(), &value, &QueryPath::new("data").add("contents"))
    }

    fn error_message(value: serde_json::Value) -> String {
        parse(value).unwrap_err().to_string()
    }

    #[test]
    fn output_follows_declaration_order_and_fills_defaults() {
        let value = parse(json!({ "upvotes": { "userId": "10", "vote": true }, "text": "hi" })).unwrap();

        let expected = PrismaValue::Object(vec![
            ("text".to_owned(), PrismaValue::String("hi".to_owned())),
            ("likes".to_owned(), PrismaValue::Int(0)),
            (
                "upvotes".to_owned(),
                PrismaValue::List(vec![PrismaValue::Object(vec![
                    ("vote".to_owned(), PrismaValue::Boolean(true)),
                    ("userId".to_owned(), PrismaValue::String("10".to_owned())),
                ])]),
            ),
        ]);

        assert_eq!(value, expected);
    }

    #[test]
    fn nested_set_envelopes_are_unwrapped() {
        let shorthand = parse(json!({ "text": "hi", "upvotes": [{ "vote": false, "userId": "1" }] })).unwrap();
        let envelope = parse(json!({ "text": "hi", "upvotes": { "set": [{ "vote": false, "userId": "1" }] } })).unwrap();

        assert_eq!(shorthand, envelope);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        expect!["`data.contents.title`: Field does not exist in enclosing type."]
            .assert_eq(&error_message(json!({ "text": "hi", "title": "nope" })));
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        expect!["`data.contents.text`: A value is required but not set"].assert_eq(&error_message(json!({})));
    }

    #[test]
    fn null_for_required_fields_is_rejected() {
        expect!["Argument text for data.contents.text must not be null"]
            .assert_eq(&error_message(json!({ "text": null })));
    }

    #[test]
    fn scalar_type_mismatches_are_rejected() {
        expect!["Invalid argument type. `text` should be of any of the following types: `String`"]
            .assert_eq(&error_message(json!({ "text": 12 })));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let date = error_message(json!({ "text": "hi", "postedAt": "yesterday" }));
        assert!(date.starts_with("Invalid argument value. `yesterday` is not a valid `DateTime`."));

        expect!["Invalid argument value. `ANGRY` is not a valid `Mood`"]
            .assert_eq(&error_message(json!({ "text": "hi", "mood": "ANGRY" })));
    }

    #[test]
    fn non_objects_are_rejected() {
        expect!["Invalid argument type. `contents` should be of any of the following types: `CommentContentCreateInput`"]
            .assert_eq(&error_message(json!("text")));
    }
}
