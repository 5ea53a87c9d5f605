use crate::Field;
use once_cell::sync::OnceCell;
use std::{fmt, sync::Arc};

pub type CompositeTypeRef = Arc<CompositeType>;

pub struct CompositeType {
    pub name: String,
    pub(crate) fields: OnceCell<Vec<Field>>,
}

impl CompositeType {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            fields: OnceCell::new(),
        }
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        self.fields.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name() == name)
    }

    pub fn find_field_or_err(&self, name: &str) -> crate::Result<&Field> {
        self.find_field(name).ok_or_else(|| crate::DomainError::FieldNotFound {
            name: name.to_owned(),
            container_name: self.name.clone(),
            container_type: "composite type",
        })
    }
}

impl PartialEq for CompositeType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompositeType").field(&self.name).finish()
    }
}
