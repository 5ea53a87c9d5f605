use crate::{FieldArity, InternalEnumRef, TypeIdentifier};
use prisma_value::PrismaValue;
use std::{fmt, sync::Arc};

pub type ScalarFieldRef = Arc<ScalarField>;

#[derive(Clone, PartialEq)]
pub struct ScalarField {
    pub name: String,
    pub type_identifier: TypeIdentifier,
    pub arity: FieldArity,
    pub is_id: bool,
    pub internal_enum: Option<InternalEnumRef>,
    /// Static default applied when a create input omits the field.
    pub default_value: Option<PrismaValue>,
}

impl ScalarField {
    pub fn is_list(&self) -> bool {
        self.arity.is_list()
    }

    pub fn is_required(&self) -> bool {
        self.arity.is_required()
    }

    pub fn is_optional(&self) -> bool {
        self.arity.is_optional()
    }

    pub fn is_id(&self) -> bool {
        self.is_id
    }

    pub fn default_value(&self) -> Option<&PrismaValue> {
        self.default_value.as_ref()
    }

    pub fn type_name(&self) -> String {
        if self.is_list() {
            format!("{}[]", self.type_identifier)
        } else {
            self.type_identifier.to_string()
        }
    }
}

impl fmt::Debug for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScalarField").field(&self.name).finish()
    }
}
