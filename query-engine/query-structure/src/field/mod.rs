mod composite;
mod scalar;

pub use composite::*;
pub use scalar::*;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Scalar(ScalarFieldRef),
    Composite(CompositeFieldRef),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Scalar(ref sf) => &sf.name,
            Field::Composite(ref cf) => &cf.name,
        }
    }

    pub fn arity(&self) -> FieldArity {
        match self {
            Field::Scalar(sf) => sf.arity,
            Field::Composite(cf) => cf.arity,
        }
    }

    pub fn is_list(&self) -> bool {
        self.arity().is_list()
    }

    pub fn is_required(&self) -> bool {
        self.arity().is_required()
    }

    pub fn into_scalar(self) -> Option<ScalarFieldRef> {
        match self {
            Field::Scalar(sf) => Some(sf),
            _ => None,
        }
    }

    pub fn into_composite(self) -> Option<CompositeFieldRef> {
        match self {
            Field::Composite(cf) => Some(cf),
            _ => None,
        }
    }
}

impl From<ScalarFieldRef> for Field {
    fn from(sf: ScalarFieldRef) -> Self {
        Field::Scalar(sf)
    }
}

impl From<CompositeFieldRef> for Field {
    fn from(cf: CompositeFieldRef) -> Self {
        Field::Composite(cf)
    }
}

/// Cardinality of a field. Lists are never nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldArity {
    Required,
    Optional,
    List,
}

impl FieldArity {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeIdentifier {
    String,
    Int,
    BigInt,
    Float,
    Boolean,
    Enum(String),
    Json,
    DateTime,
}

impl TypeIdentifier {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TypeIdentifier::Int | TypeIdentifier::BigInt | TypeIdentifier::Float
        )
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeIdentifier::String => f.write_str("String"),
            TypeIdentifier::Int => f.write_str("Int"),
            TypeIdentifier::BigInt => f.write_str("BigInt"),
            TypeIdentifier::Float => f.write_str("Float"),
            TypeIdentifier::Boolean => f.write_str("Boolean"),
            TypeIdentifier::Enum(name) => f.write_str(name),
            TypeIdentifier::Json => f.write_str("Json"),
            TypeIdentifier::DateTime => f.write_str("DateTime"),
        }
    }
}
