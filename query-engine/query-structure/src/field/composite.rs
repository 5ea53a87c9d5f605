use crate::{CompositeTypeRef, FieldArity};
use std::{fmt, sync::Arc};

pub type CompositeFieldRef = Arc<CompositeField>;

/// A field holding an embedded document (or a list of them).
#[derive(Clone, PartialEq)]
pub struct CompositeField {
    pub name: String,
    pub arity: FieldArity,
    pub typ: CompositeTypeRef,
}

impl CompositeField {
    pub fn is_list(&self) -> bool {
        self.arity.is_list()
    }

    pub fn is_required(&self) -> bool {
        self.arity.is_required()
    }

    pub fn is_optional(&self) -> bool {
        self.arity.is_optional()
    }

    /// Only optional single composites accept `null`.
    pub fn is_nullable(&self) -> bool {
        self.arity.is_optional()
    }

    pub fn typ(&self) -> &CompositeTypeRef {
        &self.typ
    }
}

impl fmt::Debug for CompositeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeField")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("typ", &self.typ.name)
            .finish()
    }
}
