mod composite_type_builder;
mod field_builders;
mod internal_dm_builder;
mod model_builder;

pub use composite_type_builder::*;
pub use field_builders::*;
pub use internal_dm_builder::*;
pub use model_builder::*;

use crate::{CompositeTypeRef, InternalEnumRef};

/// Lookup tables the field builders resolve type names against.
pub(crate) struct BuildContext<'a> {
    pub(crate) composite_types: &'a [CompositeTypeRef],
    pub(crate) enums: &'a [InternalEnumRef],
}

impl BuildContext<'_> {
    pub(crate) fn composite_type(&self, name: &str) -> crate::Result<CompositeTypeRef> {
        self.composite_types
            .iter()
            .find(|ct| ct.name == name)
            .cloned()
            .ok_or_else(|| crate::DomainError::CompositeTypeNotFound { name: name.to_owned() })
    }

    pub(crate) fn internal_enum(&self, name: &str) -> crate::Result<InternalEnumRef> {
        self.enums
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .ok_or_else(|| crate::DomainError::EnumNotFound { name: name.to_owned() })
    }
}
