use crate::KnownError;
use itertools::Itertools;
use serde::Serialize;
use serde_json::json;
use std::{borrow::Cow, error, fmt};

/// A validation error is a Serializable object that contains the path where the validation error
/// of a certain `kind` ocurred, and an optional and arbitrary piece of `meta`-information.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    #[serde(skip)]
    message: String,
    #[serde(flatten)]
    meta: Option<serde_json::Value>,
}

impl ValidationError {
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn meta(&self) -> Option<&serde_json::Value> {
        self.meta.as_ref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for ValidationError {}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// See [`ValidationError::null_not_allowed`]
    NullNotAllowed,
    ///See [`ValidationError::invalid_argument_type`]
    InvalidArgumentType,
    ///See [`ValidationError::invalid_argument_value`]
    InvalidArgumentValue,
    /// See [`ValidationError::some_fields_missing`]
    SomeFieldsMissing,
    /// See [`ValidationError::too_many_fields_given`]
    TooManyFieldsGiven,
    /// See [`ValidationError::required_argument_missing`]
    RequiredArgumentMissing,
    /// See [`ValidationError::unknown_argument`]
    UnknownArgument,
    /// See [`ValidationError::unknown_input_field`]
    UnknownInputField,
}

impl ValidationErrorKind {
    /// Returns the appropriate code code for the different validation errors.
    ///
    /// Missing required arguments keep their historical code, everything else is a generic
    /// query validation failure.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::RequiredArgumentMissing => "P2012",
            _ => "P2009",
        }
    }
}

impl From<ValidationError> for crate::KnownError {
    fn from(err: ValidationError) -> Self {
        let meta = serde_json::to_value(&err).unwrap_or(serde_json::Value::Null);

        KnownError {
            message: err.message,
            meta,
            error_code: Cow::from(err.kind.code()),
        }
    }
}

impl From<ValidationError> for crate::Error {
    fn from(err: ValidationError) -> Self {
        KnownError::from(err).into()
    }
}

impl ValidationError {
    /// Creates a [`ValidationErrorKind::NullNotAllowed`] kind of error, which happens when `null`
    /// is given for an argument that is not nullable. The argument name is the last segment of the
    /// path, so the shorthand form and the `set` envelope report different arguments.
    ///
    /// Example input for a required composite list field `contents`:
    ///
    /// {
    ///     "data": {
    ///         "contents": { "set": null }
    ///     }
    /// }
    pub fn null_not_allowed(argument_path: Vec<&str>) -> Self {
        let argument_name = argument_path.last().copied().unwrap_or_default();
        let message = format!(
            "Argument {} for {} must not be null",
            argument_name,
            argument_path.join(".")
        );

        ValidationError {
            kind: ValidationErrorKind::NullNotAllowed,
            message,
            meta: Some(json!({ "argumentPath": argument_path })),
        }
    }

    /// Creates an [`ValidationErrorKind::InvalidArgumentType`] kind of error, which happens when the
    /// argument is of a type that is incompatible with its definition.
    ///
    /// Say the schema type for `CommentContent.text` is `String`, the following input fails:
    ///
    /// {
    ///     "data": {
    ///         "contents": { "push": { "text": 12 } }
    ///     }
    /// }
    pub fn invalid_argument_type(
        argument_path: Vec<&str>,
        argument_description: ArgumentDescription<'_>,
        inferred_argument_type: String,
    ) -> Self {
        let message = format!(
            "Invalid argument type. `{}` should be of any of the following types: `{}`",
            argument_description.name,
            argument_description.type_names.join(", ")
        );
        ValidationError {
            kind: ValidationErrorKind::InvalidArgumentType,
            message,
            meta: Some(
                json!({"argumentPath": argument_path, "argument": argument_description, "inferredType": inferred_argument_type }),
            ),
        }
    }

    /// Creates an [`ValidationErrorKind::InvalidArgumentValue`] kind of error, which happens when the
    /// argument is of the correct type, but its value is invalid, like a string that is not a
    /// valid RFC 3339 date for a `DateTime` field, or an enum value that is not part of the enum.
    pub fn invalid_argument_value(
        argument_path: Vec<&str>,
        value: String,
        expected_argument_type: &str,
        underlying_err: Option<Box<dyn error::Error>>,
    ) -> Self {
        let argument_name = argument_path.last().copied().unwrap_or_default();
        let argument = ArgumentDescription::new(argument_name, vec![Cow::Borrowed(expected_argument_type)]);

        let (message, meta) = match underlying_err {
            Some(err) => {
                let err_msg = err.to_string();
                let message = format!(
                    "Invalid argument value. `{value}` is not a valid `{expected_argument_type}`. Underlying error: {err_msg}"
                );
                let meta = json!({"argumentPath": argument_path, "argument": argument, "underlyingError": &err_msg});
                (message, meta)
            }
            None => {
                let message = format!("Invalid argument value. `{value}` is not a valid `{expected_argument_type}`");
                let meta = json!({"argumentPath": argument_path, "argument": argument, "underlyingError": serde_json::Value::Null});
                (message, meta)
            }
        };

        ValidationError {
            kind: ValidationErrorKind::InvalidArgumentValue,
            message,
            meta: Some(meta),
        }
    }

    /// Creates an [`ValidationErrorKind::SomeFieldsMissing`] kind of error, which happens when
    /// there are some fields missing from an input object, like an empty `updateMany.data`.
    pub fn some_fields_missing(
        argument_path: Vec<&str>,
        min_field_count: Option<usize>,
        max_field_count: Option<usize>,
        provided_field_count: usize,
        input_type_description: &InputTypeDescription,
    ) -> Self {
        let constraints = InputTypeConstraints::new(min_field_count, max_field_count, provided_field_count);
        let message = format!("Some fields are missing: {constraints}");
        ValidationError {
            kind: ValidationErrorKind::SomeFieldsMissing,
            message,
            meta: Some(
                json!({ "inputType": input_type_description, "argumentPath": argument_path, "constraints": constraints }),
            ),
        }
    }

    /// Creates an [`ValidationErrorKind::TooManyFieldsGiven`] kind of error, which happens when
    /// there are more fields given than the ones a type accept, like two operations in one envelope.
    pub fn too_many_fields_given(
        argument_path: Vec<&str>,
        min_field_count: Option<usize>,
        max_field_count: Option<usize>,
        provided_field_count: usize,
        input_type_description: &InputTypeDescription,
    ) -> Self {
        let constraints = InputTypeConstraints::new(min_field_count, max_field_count, provided_field_count);
        let message = format!("Too many fields given: {constraints}");
        ValidationError {
            kind: ValidationErrorKind::TooManyFieldsGiven,
            message,
            meta: Some(
                json!({ "inputType": input_type_description, "argumentPath": argument_path, "constraints": constraints }),
            ),
        }
    }

    /// Creates an [`ValidationErrorKind::RequiredArgumentMissing`] kind of error, which happens
    /// when a required input field is not given, like a pushed composite value without `text`:
    ///
    /// {
    ///     "data": {
    ///         "contents": { "push": { "upvotes": [] } }
    ///     }
    /// }
    pub fn required_argument_missing(argument_path: Vec<&str>, input_type_description: &InputTypeDescription) -> Self {
        let message = format!("`{}`: A value is required but not set", argument_path.join("."));
        ValidationError {
            kind: ValidationErrorKind::RequiredArgumentMissing,
            message,
            meta: Some(json!({ "inputType": input_type_description, "argumentPath": argument_path })),
        }
    }

    /// Creates an [`ValidationErrorKind::UnknownArgument`] kind of error, which happens when an
    /// operation envelope receives an operation that does not exist for its type, like `unset` on
    /// a composite list field.
    ///
    /// {
    ///     "data": {
    ///         "contents": { "unset": true }
    ///     }
    /// }
    pub fn unknown_argument(
        argument_path: Vec<&str>,
        enclosing_type_name: &str,
        valid_argument_descriptions: Vec<ArgumentDescription<'_>>,
    ) -> Self {
        let argument_name = argument_path.last().copied().unwrap_or_default();
        let message = format!(
            "Unknown arg `{}` in {} for type {}",
            argument_name,
            argument_path.join("."),
            enclosing_type_name
        );
        ValidationError {
            kind: ValidationErrorKind::UnknownArgument,
            message,
            meta: Some(json!({"argumentPath": argument_path, "arguments": valid_argument_descriptions, "typeName": enclosing_type_name})),
        }
    }

    /// Creates a [`ValidationErrorKind::UnknownInputField`] kind of error, which happens when the
    /// argument value contains a field that does not exist in the input type.
    ///
    /// {
    ///     "where": {
    ///         "foo": 2
    ///     }
    /// }
    pub fn unknown_input_field(argument_path: Vec<&str>, input_type_description: InputTypeDescription) -> Self {
        let message = format!("`{}`: Field does not exist in enclosing type.", argument_path.join("."));
        ValidationError {
            kind: ValidationErrorKind::UnknownInputField,
            message,
            meta: Some(json!({ "inputType": input_type_description, "argumentPath": argument_path })),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InputTypeDescription {
    Object {
        name: String,
        fields: Vec<InputTypeDescriptionField>,
    },
    Scalar {
        name: String,
    },
    List {
        element_type: Box<InputTypeDescription>,
    },
    Enum {
        name: String,
    },
}

impl InputTypeDescription {
    pub fn new_object(name: String, fields: Vec<InputTypeDescriptionField>) -> Self {
        Self::Object { name, fields }
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Object { name, .. } | Self::Scalar { name } | Self::Enum { name } => Cow::Borrowed(name),
            Self::List { element_type } => Cow::Owned(format!("{}[]", element_type.name())),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InputTypeDescriptionField {
    name: String,
    type_names: Vec<String>,
    required: bool,
}

impl InputTypeDescriptionField {
    pub fn new(name: String, type_names: Vec<String>, required: bool) -> Self {
        Self {
            name,
            type_names,
            required,
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct InputTypeConstraints {
    #[serde(rename = "minFieldCount")]
    min: Option<usize>,
    #[serde(rename = "maxFieldCount")]
    max: Option<usize>,
    #[serde(skip)]
    got: usize,
}

impl InputTypeConstraints {
    fn new(min: Option<usize>, max: Option<usize>, got: usize) -> Self {
        Self { min, max, got }
    }
}

impl fmt::Display for InputTypeConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(1), Some(1)) => {
                write!(f, "Expected exactly one field to be present, got {}.", self.got)
            }
            (Some(min), Some(max)) => write!(
                f,
                "Expected a minimum of {} and at most {} fields to be present, got {}.",
                min, max, self.got
            ),
            (Some(min), None) => write!(
                f,
                "Expected a minimum of {} fields to be present, got {}.",
                min, self.got
            ),
            (None, Some(max)) => write!(f, "Expected at most {} fields to be present, got {}.", max, self.got),
            (None, None) => write!(f, "Expected any selection of fields, got {}.", self.got),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDescription<'a> {
    name: Cow<'a, str>,
    type_names: Vec<Cow<'a, str>>,
}

impl<'a> ArgumentDescription<'a> {
    pub fn new(name: impl Into<Cow<'a, str>>, type_names: Vec<Cow<'a, str>>) -> Self {
        Self {
            name: name.into(),
            type_names,
        }
    }
}

impl fmt::Display for ArgumentDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_names.iter().join(" | "))
    }
}
