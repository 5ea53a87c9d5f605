use crate::*;
use std::{fmt, sync::Arc};

pub type ModelRef = Arc<Model>;

pub struct Model {
    pub name: String,
    pub(crate) fields: Fields,
}

impl Model {
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns the field to be used as the primary identifier for a record of that model.
    pub fn primary_identifier(&self) -> crate::Result<ScalarFieldRef> {
        self.fields.id().ok_or_else(|| DomainError::MissingIdField {
            model: self.name.clone(),
        })
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(&self.name).finish()
    }
}
