use crate::{
    constants::{args, operations},
    query_graph_builder::extractors::{expect_bool, extract_filter},
    query_document::{
        conversions, parse_composite_create, parse_create_fields, parse_scalar, parse_scalar_value, JsonMap,
        QueryParserError, QueryParserResult, QueryPath,
    },
    schema::{self, IdentifierType},
};
use query_structure::{
    CompositeFieldRef, CompositeWriteOperation, Field, Filter, ModelRef, NestedWrite, ParentContainer, PrismaValue,
    ScalarFieldRef, TypeIdentifier, WriteArgs, WriteOperation,
};
use serde_json::Value;
use std::borrow::Cow;
use user_facing_errors::query_engine::validation::{
    ArgumentDescription, InputTypeDescription, InputTypeDescriptionField, ValidationError,
};

#[derive(Default, Debug)]
pub struct WriteArgsParser {
    pub args: WriteArgs,
}

impl WriteArgsParser {
    /// Creates a new set of WriteArgsParser. Expects the raw input map from the respective data key, not the enclosing map.
    /// E.g.: { data: { THIS MAP } } from the `data` argument of an update query.
    #[tracing::instrument(name = "write_args_parser_from", skip(model, data_map, path))]
    pub fn from(model: &ModelRef, data_map: &JsonMap, path: &QueryPath) -> QueryParserResult<Self> {
        data_map
            .iter()
            .try_fold(WriteArgsParser::default(), |mut args, (k, v): (&String, &Value)| {
                let field_path = path.add(k.as_str());
                let field = model.fields().find_from_all(k).map_err(|_| {
                    ValidationError::unknown_input_field(
                        field_path.segments(),
                        conversions::fields_to_input_type_description(
                            &IdentifierType::UpdateManyInput(model.name.clone()),
                            &model.fields().all,
                        ),
                    )
                })?;

                let write_op = match field {
                    Field::Scalar(sf) if sf.is_list() => parse_scalar_list(&model.name, sf, v, &field_path)?,
                    Field::Scalar(sf) => parse_scalar_update(sf, v, &field_path)?,
                    Field::Composite(cf) => parse_composite_writes(cf, v, &field_path)?,
                };

                tracing::debug!(field = %k, operation = ?write_op, "translated write operation");
                args.args.insert(k.as_str(), write_op);

                Ok(args)
            })
    }

    /// Parses the `data` argument of a create. Every field of the model ends up in the args, in
    /// declaration order, unless it is optional and not given.
    #[tracing::instrument(name = "write_args_parser_from_create", skip(model, data_map, path))]
    pub fn from_create(model: &ModelRef, data_map: &JsonMap, path: &QueryPath) -> QueryParserResult<Self> {
        let fields = &model.fields().all;
        let values = parse_create_fields(fields, data_map, path, || {
            conversions::fields_to_input_type_description(&IdentifierType::CreateOneInput(model.name.clone()), fields)
        })?;

        let args = values
            .into_iter()
            .map(|(name, value)| {
                let write_op = match model.fields().find_from_all(&name) {
                    Ok(Field::Composite(_)) => WriteOperation::composite_set(value),
                    _ => WriteOperation::scalar_set(value),
                };

                (name, write_op)
            })
            .collect();

        Ok(WriteArgsParser { args })
    }
}

/// Translates the update input of a composite field into a single write operation.
///
/// The value is either an operation envelope (`{ push: ... }`), or a shorthand for `set`:
/// `null`, a list of objects, or a single object. An object is an envelope as soon as one of its
/// keys names an envelope operation that is not also a field of the composite type.
pub fn parse_composite_writes(cf: &CompositeFieldRef, v: &Value, path: &QueryPath) -> QueryParserResult<WriteOperation> {
    match v {
        // Null-set operation.
        Value::Null if cf.is_nullable() => Ok(WriteOperation::composite_set(PrismaValue::Null)),
        Value::Null => Err(ValidationError::null_not_allowed(path.segments()).into()),

        // Set list shorthand operation (can only be objects).
        Value::Array(_) if cf.is_list() => Ok(WriteOperation::composite_set(parse_set_value(cf, v, path)?)),

        // One of:
        // - Operation envelope with further actions nested.
        // - Single object set shorthand.
        Value::Object(map) if is_composite_envelope(cf, map) => parse_composite_envelope(cf, map, path),
        Value::Object(_) => Ok(WriteOperation::composite_set(parse_set_value(cf, v, path)?)),

        other => {
            let create_input = IdentifierType::CompositeCreateInput(cf.typ().clone()).to_string();
            let mut type_names = vec![Cow::Owned(create_input.clone())];

            if cf.is_list() {
                type_names.push(Cow::Owned(format!("{create_input}[]")));
            }

            type_names.push(Cow::Owned(schema::composite_update_envelope_type(cf).to_string()));

            Err(ValidationError::invalid_argument_type(
                path.segments(),
                ArgumentDescription::new(cf.name.clone(), type_names),
                conversions::inferred_type_name(other),
            )
            .into())
        }
    }
}

fn is_composite_envelope(cf: &CompositeFieldRef, map: &JsonMap) -> bool {
    map.keys()
        .any(|key| operations::COMPOSITE_ENVELOPE.contains(&key.as_str()) && cf.typ().find_field(key).is_none())
}

fn parse_composite_envelope(
    cf: &CompositeFieldRef,
    envelope: &JsonMap,
    path: &QueryPath,
) -> QueryParserResult<WriteOperation> {
    let legal_operations = schema::composite_update_envelope_operations(cf);

    if let Some(illegal) = envelope.keys().find(|key| !legal_operations.contains(&key.as_str())) {
        return Err(ValidationError::unknown_argument(
            path.add(illegal.as_str()).segments(),
            &schema::composite_update_envelope_type(cf).to_string(),
            schema::composite_update_envelope_arguments(cf),
        )
        .into());
    }

    if !cf.is_nullable() && envelope.get(operations::SET) == Some(&Value::Null) {
        return Err(ValidationError::null_not_allowed(path.add(operations::SET).segments()).into());
    }

    // Exactly one operation per envelope.
    let (op, value) = match envelope.iter().next() {
        Some(entry) if envelope.len() == 1 => entry,
        _ => {
            return Err(ValidationError::too_many_fields_given(
                path.segments(),
                Some(1),
                Some(1),
                envelope.len(),
                &schema::composite_update_envelope_description(cf),
            )
            .into())
        }
    };

    let op_path = path.add(op.as_str());

    let write_op = match op.as_str() {
        operations::SET => match value {
            Value::Null => WriteOperation::composite_set(PrismaValue::Null),
            value => WriteOperation::composite_set(parse_set_value(cf, value, &op_path)?),
        },
        operations::PUSH => WriteOperation::composite_push(parse_push_value(cf, value, &op_path)?),
        operations::UPDATE => {
            WriteOperation::Composite(parse_composite_updates(cf, value, &op_path)?)
        }
        operations::UPSERT => parse_composite_upsert(cf, value, &op_path)?,
        operations::UNSET => WriteOperation::composite_unset(expect_bool(value, &op_path)?),
        operations::UPDATE_MANY => parse_composite_update_many(cf, value, &op_path)?,
        _ => parse_composite_delete_many(cf, value, &op_path)?,
    };

    Ok(write_op)
}

/// `set` and the shorthand forms: lists always receive a `PrismaValue::List`.
fn parse_set_value(cf: &CompositeFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    match value {
        Value::Array(elements) if cf.is_list() => parse_composite_elements(cf, elements, path),
        value if cf.is_list() => Ok(PrismaValue::List(vec![parse_composite_create(cf.typ(), value, path)?])),
        value => parse_composite_create(cf.typ(), value, path),
    }
}

/// A single element or a list of elements, each validated against the composite type. Nothing is
/// produced unless every element is valid.
fn parse_push_value(cf: &CompositeFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    match value {
        Value::Null => Err(ValidationError::null_not_allowed(path.segments()).into()),
        Value::Array(elements) => parse_composite_elements(cf, elements, path),
        value => Ok(PrismaValue::List(vec![parse_composite_create(cf.typ(), value, path)?])),
    }
}

fn parse_composite_elements(cf: &CompositeFieldRef, elements: &[Value], path: &QueryPath) -> QueryParserResult<PrismaValue> {
    elements
        .iter()
        .map(|element| parse_composite_create(cf.typ(), element, path))
        .collect::<QueryParserResult<Vec<_>>>()
        .map(PrismaValue::List)
}

fn parse_composite_upsert(cf: &CompositeFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<WriteOperation> {
    let identifier = IdentifierType::CompositeUpsertObjectInput(cf.typ().clone());
    let map = expect_object(value, &identifier, path)?;

    let describe = || {
        input_object_description(
            &identifier,
            &[(operations::SET, cf.typ().name.as_str()), (operations::UPDATE, cf.typ().name.as_str())],
        )
    };

    check_known_fields(map, &[operations::SET, operations::UPDATE], path, &describe)?;

    let set_value = required_field(map, operations::SET, path, &describe)?;
    let update_value = required_field(map, operations::UPDATE, path, &describe)?;

    let set = CompositeWriteOperation::Set(parse_composite_create(cf.typ(), set_value, &path.add(operations::SET))?);
    let update = parse_composite_updates(cf, update_value, &path.add(operations::UPDATE))?;

    Ok(WriteOperation::composite_upsert(set, update))
}

fn parse_composite_update_many(
    cf: &CompositeFieldRef,
    value: &Value,
    path: &QueryPath,
) -> QueryParserResult<WriteOperation> {
    let identifier = IdentifierType::CompositeUpdateManyInput(cf.typ().clone());
    let map = expect_object(value, &identifier, path)?;

    let where_type = IdentifierType::WhereInput(cf.typ().name.clone()).to_string();
    let update_type = IdentifierType::CompositeUpdateInput(cf.typ().clone()).to_string();
    let describe = || input_object_description(&identifier, &[(args::WHERE, where_type.as_str()), (args::DATA, update_type.as_str())]);

    check_known_fields(map, &[args::WHERE, args::DATA], path, &describe)?;

    let filter = parse_element_filter(cf, required_field(map, args::WHERE, path, &describe)?, &path.add(args::WHERE))?;
    let update = parse_composite_updates(cf, required_field(map, args::DATA, path, &describe)?, &path.add(args::DATA))?;

    Ok(WriteOperation::composite_update_many(filter, update))
}

fn parse_composite_delete_many(
    cf: &CompositeFieldRef,
    value: &Value,
    path: &QueryPath,
) -> QueryParserResult<WriteOperation> {
    let identifier = IdentifierType::CompositeDeleteManyInput(cf.typ().clone());
    let map = expect_object(value, &identifier, path)?;

    let where_type = IdentifierType::WhereInput(cf.typ().name.clone()).to_string();
    let describe = || input_object_description(&identifier, &[(args::WHERE, where_type.as_str())]);

    check_known_fields(map, &[args::WHERE], path, &describe)?;

    let filter = parse_element_filter(cf, required_field(map, args::WHERE, path, &describe)?, &path.add(args::WHERE))?;

    Ok(WriteOperation::composite_delete_many(filter))
}

/// The `where` of `updateMany` and `deleteMany` selects list elements, so it is a filter over the
/// composite type.
fn parse_element_filter(cf: &CompositeFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<Filter> {
    let identifier = IdentifierType::WhereInput(cf.typ().name.clone());
    let map = expect_object(value, &identifier, path)?;

    extract_filter(map, &ParentContainer::CompositeType(cf.typ().clone()), path)
}

/// The composite update input of `update`, `upsert.update` and `updateMany.data`. At least one
/// field is required.
fn parse_composite_updates(
    cf: &CompositeFieldRef,
    value: &Value,
    path: &QueryPath,
) -> QueryParserResult<CompositeWriteOperation> {
    let identifier = IdentifierType::CompositeUpdateInput(cf.typ().clone());
    let map = expect_object(value, &identifier, path)?;
    let describe = || conversions::fields_to_input_type_description(&identifier, cf.typ().fields());

    if map.is_empty() {
        return Err(ValidationError::some_fields_missing(path.segments(), Some(1), None, 0, &describe()).into());
    }

    let mut writes = vec![];

    for (k, v) in map {
        let field_path = path.add(k.as_str());
        let field = cf
            .typ()
            .find_field(k)
            .ok_or_else(|| ValidationError::unknown_input_field(field_path.segments(), describe()))?;

        let write_op = match field {
            Field::Scalar(sf) if sf.is_list() => parse_scalar_list(&cf.typ().name, sf, v, &field_path),
            Field::Scalar(sf) => parse_scalar_update(sf, v, &field_path),
            Field::Composite(cf) => parse_composite_writes(cf, v, &field_path),
        }?;

        writes.push((k.clone(), write_op));
    }

    Ok(CompositeWriteOperation::Update(NestedWrite::new(writes)))
}

/// A scalar update is a plain value (`set`) or a `FieldUpdateOperationsInput` with exactly one
/// operation. Json fields take any JSON value as a plain value.
fn parse_scalar_update(sf: &ScalarFieldRef, v: &Value, path: &QueryPath) -> QueryParserResult<WriteOperation> {
    let map = match v {
        Value::Object(map) if sf.type_identifier != TypeIdentifier::Json => map,
        v => return Ok(WriteOperation::scalar_set(parse_scalar(sf, v, path)?)),
    };

    let legal_operations = schema::scalar_update_operations(sf);

    if let Some(illegal) = map.keys().find(|key| !legal_operations.contains(&key.as_str())) {
        return Err(ValidationError::unknown_argument(
            path.add(illegal.as_str()).segments(),
            &schema::scalar_update_operations_type(sf).to_string(),
            schema::scalar_update_operations_arguments(sf),
        )
        .into());
    }

    let (operation, value) = match map.iter().next() {
        Some(entry) if map.len() == 1 => entry,
        _ => return Err(exactly_one_field(map.len(), path, &schema::scalar_update_operations_description(sf))),
    };

    let op_path = path.add(operation.as_str());

    let write_op = match operation.as_str() {
        operations::SET => WriteOperation::scalar_set(parse_scalar(sf, value, &op_path)?),
        operations::UNSET => WriteOperation::scalar_unset(expect_bool(value, &op_path)?),
        operations::INCREMENT => WriteOperation::scalar_add(parse_operand(sf, value, &op_path)?),
        operations::DECREMENT => WriteOperation::scalar_subtract(parse_operand(sf, value, &op_path)?),
        operations::MULTIPLY => WriteOperation::scalar_multiply(parse_operand(sf, value, &op_path)?),
        _ => WriteOperation::scalar_divide(parse_operand(sf, value, &op_path)?),
    };

    Ok(write_op)
}

fn parse_operand(sf: &ScalarFieldRef, value: &Value, path: &QueryPath) -> QueryParserResult<PrismaValue> {
    match value {
        Value::Null => Err(ValidationError::null_not_allowed(path.segments()).into()),
        value => parse_scalar_value(sf, value, path),
    }
}

/// Scalar lists take a plain list (`set`), or `{ set }` / `{ push }` where `push` appends a single
/// value or a list of values.
fn parse_scalar_list(
    container_name: &str,
    sf: &ScalarFieldRef,
    v: &Value,
    path: &QueryPath,
) -> QueryParserResult<WriteOperation> {
    let map = match v {
        Value::Object(map) if sf.type_identifier != TypeIdentifier::Json => map,
        v => return Ok(WriteOperation::scalar_set(parse_scalar(sf, v, path)?)),
    };

    let identifier = IdentifierType::ScalarListUpdateInput(container_name.to_owned(), sf.clone());
    let legal_operations = [operations::SET, operations::PUSH];

    if let Some(illegal) = map.keys().find(|key| !legal_operations.contains(&key.as_str())) {
        let arguments = legal_operations
            .iter()
            .map(|op| ArgumentDescription::new(*op, vec![Cow::Owned(sf.type_name())]))
            .collect();

        return Err(ValidationError::unknown_argument(
            path.add(illegal.as_str()).segments(),
            &identifier.to_string(),
            arguments,
        )
        .into());
    }

    let type_name = sf.type_name();
    let description = input_object_description(
        &identifier,
        &[(operations::SET, type_name.as_str()), (operations::PUSH, type_name.as_str())],
    );

    let (operation, value) = match map.iter().next() {
        Some(entry) if map.len() == 1 => entry,
        _ => return Err(exactly_one_field(map.len(), path, &description)),
    };

    let op_path = path.add(operation.as_str());
    let pv = parse_scalar(sf, value, &op_path)?;

    match operation.as_str() {
        operations::SET => Ok(WriteOperation::scalar_set(pv)),
        _ => Ok(WriteOperation::scalar_add(pv)),
    }
}

fn exactly_one_field(provided: usize, path: &QueryPath, description: &InputTypeDescription) -> QueryParserError {
    if provided == 0 {
        ValidationError::some_fields_missing(path.segments(), Some(1), Some(1), provided, description).into()
    } else {
        ValidationError::too_many_fields_given(path.segments(), Some(1), Some(1), provided, description).into()
    }
}

fn expect_object<'a>(value: &'a Value, identifier: &IdentifierType, path: &QueryPath) -> QueryParserResult<&'a JsonMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationError::invalid_argument_type(
            path.segments(),
            ArgumentDescription::new(
                path.last().unwrap_or_default().to_owned(),
                vec![Cow::Owned(identifier.to_string())],
            ),
            conversions::inferred_type_name(other),
        )
        .into()),
    }
}

fn check_known_fields(
    map: &JsonMap,
    known: &[&str],
    path: &QueryPath,
    describe: &dyn Fn() -> InputTypeDescription,
) -> QueryParserResult<()> {
    match map.keys().find(|key| !known.contains(&key.as_str())) {
        Some(unknown) => Err(ValidationError::unknown_input_field(path.add(unknown.as_str()).segments(), describe()).into()),
        None => Ok(()),
    }
}

fn required_field<'a>(
    map: &'a JsonMap,
    name: &str,
    path: &QueryPath,
    describe: &dyn Fn() -> InputTypeDescription,
) -> QueryParserResult<&'a Value> {
    map.get(name)
        .ok_or_else(|| ValidationError::required_argument_missing(path.add(name).segments(), &describe()).into())
}

fn input_object_description(identifier: &IdentifierType, fields: &[(&str, &str)]) -> InputTypeDescription {
    let fields = fields
        .iter()
        .map(|(name, type_name)| InputTypeDescriptionField::new((*name).to_owned(), vec![(*type_name).to_owned()], true))
        .collect();

    InputTypeDescription::new_object(identifier.to_string(), fields)
}
