use crate::{
    document::{self, Document},
    filter::matches,
    MemoryError,
};
use prisma_value::PrismaValue;
use query_structure::{
    CompositeFieldRef, CompositeType, CompositeWriteOperation, Field, NestedWrite, ScalarFieldRef,
    ScalarWriteOperation, WriteOperation,
};

/// Applies a write operation for `field` to a record or an embedded document.
pub(crate) fn apply_write(doc: &mut Document, field: &Field, op: WriteOperation) -> crate::Result<()> {
    match (field, op) {
        (Field::Scalar(sf), WriteOperation::Scalar(op)) => apply_scalar(doc, sf, op),
        (Field::Composite(cf), WriteOperation::Composite(op)) => apply_composite(doc, cf, op),
        (field, op) => Err(MemoryError::UnsupportedOperation(format!(
            "{op:?} on field `{}`",
            field.name()
        ))),
    }
}

fn apply_scalar(doc: &mut Document, field: &ScalarFieldRef, op: ScalarWriteOperation) -> crate::Result<()> {
    let name = field.name.as_str();

    match op {
        ScalarWriteOperation::Set(value) => document::set(doc, name, value),
        ScalarWriteOperation::Add(value) if field.is_list() => push(document::list_entry(doc, name)?, value),
        ScalarWriteOperation::Add(rhs) => arithmetic(doc, name, |lhs| lhs + rhs),
        ScalarWriteOperation::Subtract(rhs) => arithmetic(doc, name, |lhs| lhs - rhs),
        ScalarWriteOperation::Multiply(rhs) => arithmetic(doc, name, |lhs| lhs * rhs),
        ScalarWriteOperation::Divide(rhs) => arithmetic(doc, name, |lhs| lhs / rhs),
        ScalarWriteOperation::Unset(true) => {
            document::remove(doc, name);
        }
        ScalarWriteOperation::Unset(false) => (),
    };

    Ok(())
}

fn arithmetic(doc: &mut Document, name: &str, op: impl FnOnce(PrismaValue) -> PrismaValue) {
    let current = document::get(doc, name).cloned().unwrap_or(PrismaValue::Null);
    document::set(doc, name, op(current));
}

fn apply_composite(doc: &mut Document, field: &CompositeFieldRef, op: CompositeWriteOperation) -> crate::Result<()> {
    let name = field.name.as_str();

    match op {
        CompositeWriteOperation::Set(value) => document::set(doc, name, value),
        CompositeWriteOperation::Push(value) => push(document::list_entry(doc, name)?, value),
        CompositeWriteOperation::Update(nested) => {
            apply_nested(document::object_entry(doc, name)?, field.typ(), nested)?;
        }
        CompositeWriteOperation::Unset(true) => {
            document::remove(doc, name);
        }
        CompositeWriteOperation::Unset(false) => (),
        CompositeWriteOperation::Upsert { set, update } => {
            let exists = matches!(document::get(doc, name), Some(PrismaValue::Object(_)));
            let op = if exists { *update } else { *set };

            apply_composite(doc, field, op)?;
        }
        CompositeWriteOperation::UpdateMany { filter, update } => {
            let nested = match *update {
                CompositeWriteOperation::Update(nested) => nested,
                other => {
                    return Err(MemoryError::UnsupportedOperation(format!(
                        "{other:?} inside updateMany of `{name}`"
                    )))
                }
            };

            for element in document::list_entry(doc, name)?.iter_mut() {
                if let PrismaValue::Object(obj) = element {
                    if matches(&filter, obj) {
                        apply_nested(obj, field.typ(), nested.clone())?;
                    }
                }
            }
        }
        CompositeWriteOperation::DeleteMany { filter } => {
            document::list_entry(doc, name)?.retain(|element| match element {
                PrismaValue::Object(obj) => !matches(&filter, obj),
                _ => true,
            });
        }
    };

    Ok(())
}

fn apply_nested(obj: &mut Document, typ: &CompositeType, nested: NestedWrite) -> crate::Result<()> {
    for (field_name, op) in nested.writes {
        let field = typ.find_field_or_err(&field_name)?;
        apply_write(obj, field, op)?;
    }

    Ok(())
}

fn push(list: &mut Vec<PrismaValue>, value: PrismaValue) {
    match value {
        PrismaValue::List(values) => list.extend(values),
        value => list.push(value),
    }
}
