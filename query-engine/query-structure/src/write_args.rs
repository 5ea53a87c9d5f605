use crate::Filter;
use indexmap::{map::Keys, IndexMap};
use prisma_value::PrismaValue;

/// WriteArgs represent data to be written to an underlying data source,
/// one normalized operation per top-level field.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct WriteArgs {
    pub args: IndexMap<String, WriteOperation>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum WriteOperation {
    Scalar(ScalarWriteOperation),
    Composite(CompositeWriteOperation),
}

#[derive(Debug, PartialEq, Clone)]
pub enum ScalarWriteOperation {
    /// Overwrites the field with the value.
    Set(PrismaValue),

    /// Adds the value to the field. On scalar lists, appends to the list.
    Add(PrismaValue),

    /// Subtracts the value from the field.
    Subtract(PrismaValue),

    /// Multiplies the field by the value.
    Multiply(PrismaValue),

    /// Divides the field by the value.
    Divide(PrismaValue),

    /// Removes the field from the document.
    Unset(bool),
}

#[derive(Debug, PartialEq, Clone)]
pub enum CompositeWriteOperation {
    /// Overwrites the field. List fields always carry a `PrismaValue::List`.
    Set(PrismaValue),

    /// Appends the elements of a `PrismaValue::List` to a composite list.
    Push(PrismaValue),

    /// Field-wise writes inside a single composite.
    Update(NestedWrite),

    /// Removes the field from the document.
    Unset(bool),

    /// Updates the composite if it exists, sets it otherwise.
    Upsert {
        set: Box<CompositeWriteOperation>,
        update: Box<CompositeWriteOperation>,
    },

    /// Updates every list element matching the filter.
    UpdateMany {
        filter: Filter,
        update: Box<CompositeWriteOperation>,
    },

    /// Removes every list element matching the filter.
    DeleteMany { filter: Filter },
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct NestedWrite {
    pub writes: IndexMap<String, WriteOperation>,
}

impl NestedWrite {
    pub fn new(writes: Vec<(String, WriteOperation)>) -> Self {
        Self {
            writes: writes.into_iter().collect(),
        }
    }
}

impl WriteOperation {
    pub fn scalar_set(pv: PrismaValue) -> Self {
        Self::Scalar(ScalarWriteOperation::Set(pv))
    }

    pub fn scalar_add(pv: PrismaValue) -> Self {
        Self::Scalar(ScalarWriteOperation::Add(pv))
    }

    pub fn scalar_subtract(pv: PrismaValue) -> Self {
        Self::Scalar(ScalarWriteOperation::Subtract(pv))
    }

    pub fn scalar_multiply(pv: PrismaValue) -> Self {
        Self::Scalar(ScalarWriteOperation::Multiply(pv))
    }

    pub fn scalar_divide(pv: PrismaValue) -> Self {
        Self::Scalar(ScalarWriteOperation::Divide(pv))
    }

    pub fn scalar_unset(should_unset: bool) -> Self {
        Self::Scalar(ScalarWriteOperation::Unset(should_unset))
    }

    pub fn composite_set(pv: PrismaValue) -> Self {
        Self::Composite(CompositeWriteOperation::Set(pv))
    }

    pub fn composite_push(pv: PrismaValue) -> Self {
        Self::Composite(CompositeWriteOperation::Push(pv))
    }

    pub fn composite_unset(should_unset: bool) -> Self {
        Self::Composite(CompositeWriteOperation::Unset(should_unset))
    }

    pub fn composite_upsert(set: CompositeWriteOperation, update: CompositeWriteOperation) -> Self {
        Self::Composite(CompositeWriteOperation::Upsert {
            set: Box::new(set),
            update: Box::new(update),
        })
    }

    pub fn composite_update_many(filter: Filter, update: CompositeWriteOperation) -> Self {
        Self::Composite(CompositeWriteOperation::UpdateMany {
            filter,
            update: Box::new(update),
        })
    }

    pub fn composite_delete_many(filter: Filter) -> Self {
        Self::Composite(CompositeWriteOperation::DeleteMany { filter })
    }
}

impl WriteArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, op: WriteOperation) {
        self.args.insert(key.into(), op);
    }

    pub fn take_field_value(&mut self, field: &str) -> Option<WriteOperation> {
        self.args.shift_remove(field)
    }

    pub fn keys(&self) -> Keys<'_, String, WriteOperation> {
        self.args.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }
}

impl IntoIterator for WriteArgs {
    type Item = (String, WriteOperation);
    type IntoIter = indexmap::map::IntoIter<String, WriteOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.into_iter()
    }
}

impl FromIterator<(String, WriteOperation)> for WriteArgs {
    fn from_iter<T: IntoIterator<Item = (String, WriteOperation)>>(iter: T) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}
