//! The write-side input vocabulary for composite and scalar fields: which operations an update
//! envelope accepts for a given field, and the names of the input types involved.

mod identifier_type;

pub use identifier_type::*;

use crate::constants::operations;
use query_structure::{CompositeFieldRef, ScalarFieldRef, TypeIdentifier};
use std::borrow::Cow;
use user_facing_errors::query_engine::validation::{ArgumentDescription, InputTypeDescription, InputTypeDescriptionField};

/// Operations accepted by the update envelope of a composite field, in declaration order.
///
/// - `set` is always available.
/// - `update` only for required single composites.
/// - `push`, `updateMany`, `deleteMany` only for lists.
/// - `upsert`, `unset` only for optional single composites.
pub fn composite_update_envelope_operations(cf: &CompositeFieldRef) -> Vec<&'static str> {
    let mut ops = vec![operations::SET];

    if cf.is_required() {
        ops.push(operations::UPDATE);
    }

    if cf.is_list() {
        ops.push(operations::PUSH);
    }

    if cf.is_optional() {
        ops.push(operations::UPSERT);
    }

    if cf.is_list() {
        ops.push(operations::UPDATE_MANY);
        ops.push(operations::DELETE_MANY);
    }

    if cf.is_optional() {
        ops.push(operations::UNSET);
    }

    ops
}

pub fn composite_update_envelope_type(cf: &CompositeFieldRef) -> IdentifierType {
    IdentifierType::CompositeUpdateEnvelopeInput(cf.typ().clone(), cf.arity)
}

fn composite_envelope_operation_types(cf: &CompositeFieldRef, op: &str) -> Vec<String> {
    let ct = cf.typ();
    let create_input = IdentifierType::CompositeCreateInput(ct.clone()).to_string();

    match op {
        operations::SET if cf.is_list() => vec![create_input.clone(), format!("{create_input}[]")],
        operations::SET if cf.is_nullable() => vec![create_input, "Null".to_owned()],
        operations::SET => vec![create_input],
        operations::PUSH => vec![create_input.clone(), format!("{create_input}[]")],
        operations::UPDATE => vec![IdentifierType::CompositeUpdateInput(ct.clone()).to_string()],
        operations::UPSERT => vec![IdentifierType::CompositeUpsertObjectInput(ct.clone()).to_string()],
        operations::UPDATE_MANY => vec![IdentifierType::CompositeUpdateManyInput(ct.clone()).to_string()],
        operations::DELETE_MANY => vec![IdentifierType::CompositeDeleteManyInput(ct.clone()).to_string()],
        _ => vec!["Boolean".to_owned()],
    }
}

/// Describes the arguments of a composite update envelope for validation errors.
pub fn composite_update_envelope_arguments(cf: &CompositeFieldRef) -> Vec<ArgumentDescription<'static>> {
    composite_update_envelope_operations(cf)
        .into_iter()
        .map(|op| {
            let type_names = composite_envelope_operation_types(cf, op)
                .into_iter()
                .map(Cow::Owned)
                .collect();

            ArgumentDescription::new(op, type_names)
        })
        .collect()
}

/// The envelope as an input object: exactly one of its fields must be present.
pub fn composite_update_envelope_description(cf: &CompositeFieldRef) -> InputTypeDescription {
    let fields = composite_update_envelope_operations(cf)
        .into_iter()
        .map(|op| InputTypeDescriptionField::new(op.to_owned(), composite_envelope_operation_types(cf, op), false))
        .collect();

    InputTypeDescription::new_object(composite_update_envelope_type(cf).to_string(), fields)
}

/// Operations accepted by the `FieldUpdateOperationsInput` of a non-list scalar field.
pub fn scalar_update_operations(sf: &ScalarFieldRef) -> Vec<&'static str> {
    let mut ops = vec![operations::SET];

    if sf.type_identifier.is_numeric() {
        ops.extend([
            operations::INCREMENT,
            operations::DECREMENT,
            operations::MULTIPLY,
            operations::DIVIDE,
        ]);
    }

    if sf.is_optional() {
        ops.push(operations::UNSET);
    }

    ops
}

pub fn scalar_update_operations_type(sf: &ScalarFieldRef) -> IdentifierType {
    let prefix = match &sf.type_identifier {
        TypeIdentifier::Enum(name) => format!("Enum{name}"),
        other => other.to_string(),
    };

    IdentifierType::FieldUpdateOperationsInput(!sf.is_required(), prefix)
}

fn scalar_operation_type(sf: &ScalarFieldRef, op: &str) -> String {
    match op {
        operations::UNSET => "Boolean".to_owned(),
        _ => sf.type_identifier.to_string(),
    }
}

pub fn scalar_update_operations_arguments(sf: &ScalarFieldRef) -> Vec<ArgumentDescription<'static>> {
    scalar_update_operations(sf)
        .into_iter()
        .map(|op| ArgumentDescription::new(op, vec![Cow::Owned(scalar_operation_type(sf, op))]))
        .collect()
}

pub fn scalar_update_operations_description(sf: &ScalarFieldRef) -> InputTypeDescription {
    let fields = scalar_update_operations(sf)
        .into_iter()
        .map(|op| InputTypeDescriptionField::new(op.to_owned(), vec![scalar_operation_type(sf, op)], false))
        .collect();

    InputTypeDescription::new_object(scalar_update_operations_type(sf).to_string(), fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_structure::{CompositeTypeBuilder, FieldArity, InternalDataModelBuilder, ModelBuilder};

    fn fields() -> Vec<CompositeFieldRef> {
        let dm = InternalDataModelBuilder::new()
            .model(
                ModelBuilder::new("Comment")
                    .scalar("id", TypeIdentifier::String, FieldArity::Required)
                    .composite("one", FieldArity::Required, "Content")
                    .composite("maybe", FieldArity::Optional, "Content")
                    .composite("many", FieldArity::List, "Content"),
            )
            .composite_type(CompositeTypeBuilder::new("Content").scalar(
                "text",
                TypeIdentifier::String,
                FieldArity::Required,
            ))
            .build()
            .unwrap();

        dm.find_model("Comment").unwrap().fields().composite()
    }

    #[test]
    fn envelope_operations_depend_on_arity() {
        let ops: Vec<_> = fields().iter().map(composite_update_envelope_operations).collect();

        assert_eq!(
            ops,
            vec![
                vec!["set", "update"],
                vec!["set", "upsert", "unset"],
                vec!["set", "push", "updateMany", "deleteMany"],
            ]
        );
    }

    #[test]
    fn list_envelope_arguments_render_their_types() {
        let many = fields().pop().unwrap();
        let rendered: Vec<String> = composite_update_envelope_arguments(&many)
            .iter()
            .map(ToString::to_string)
            .collect();

        expect_test::expect![[r#"
            [
                "set: ContentCreateInput | ContentCreateInput[]",
                "push: ContentCreateInput | ContentCreateInput[]",
                "updateMany: ContentUpdateManyInput",
                "deleteMany: ContentDeleteManyInput",
            ]
        "#]]
        .assert_debug_eq(&rendered);
    }
}
