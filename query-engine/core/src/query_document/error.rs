use std::fmt;
use user_facing_errors::query_engine::validation::{self, ValidationError};

pub(crate) mod conversions {
    use super::*;
    use crate::schema::IdentifierType;
    use query_structure::{CompositeTypeRef, Field, ScalarField};
    use std::borrow::Cow;

    /// Describes the fields of a composite type or model for a validation error, the way the input
    /// object named `identifier` exposes them.
    pub(crate) fn fields_to_input_type_description(
        identifier: &IdentifierType,
        fields: &[Field],
    ) -> validation::InputTypeDescription {
        let fields = fields
            .iter()
            .map(|field| {
                let type_name = match field {
                    Field::Scalar(sf) => sf.type_name(),
                    Field::Composite(cf) if cf.is_list() => format!("{}[]", cf.typ().name),
                    Field::Composite(cf) => cf.typ().name.clone(),
                };

                validation::InputTypeDescriptionField::new(
                    field.name().to_owned(),
                    vec![type_name],
                    is_required_input(field),
                )
            })
            .collect();

        validation::InputTypeDescription::new_object(identifier.to_string(), fields)
    }

    pub(crate) fn composite_create_input_description(typ: &CompositeTypeRef) -> validation::InputTypeDescription {
        fields_to_input_type_description(&IdentifierType::CompositeCreateInput(typ.clone()), typ.fields())
    }

    pub(crate) fn scalar_field_to_argument_description(sf: &ScalarField) -> validation::ArgumentDescription<'static> {
        validation::ArgumentDescription::new(sf.name.clone(), vec![Cow::Owned(sf.type_name())])
    }

    /// Required on input means: no value can be derived when it is missing.
    fn is_required_input(field: &Field) -> bool {
        match field {
            Field::Scalar(sf) => sf.is_required() && sf.default_value().is_none(),
            Field::Composite(cf) => cf.is_required(),
        }
    }

    /// Name of the type of a raw JSON value, as shown to users in type mismatch errors.
    pub(crate) fn inferred_type_name(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => "Null",
            serde_json::Value::Bool(_) => "Boolean",
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => "Int",
            serde_json::Value::Number(_) => "Float",
            serde_json::Value::String(_) => "String",
            serde_json::Value::Array(_) => "List",
            serde_json::Value::Object(_) => "Object",
        }
        .to_owned()
    }
}

#[derive(Debug)]
pub struct QueryParserError {
    error: ValidationError,
}

impl QueryParserError {
    pub fn validation_error(&self) -> &ValidationError {
        &self.error
    }

    pub fn into_user_facing_error(self) -> user_facing_errors::Error {
        user_facing_errors::KnownError::from(self.error).into()
    }
}

impl From<ValidationError> for QueryParserError {
    fn from(error: ValidationError) -> Self {
        QueryParserError { error }
    }
}

impl fmt::Display for QueryParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for QueryParserError {}

pub type QueryParserResult<T> = std::result::Result<T, QueryParserError>;
