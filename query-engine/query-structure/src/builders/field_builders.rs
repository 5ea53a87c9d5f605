use super::BuildContext;
use crate::{CompositeField, Field, FieldArity, ScalarField, TypeIdentifier};
use prisma_value::PrismaValue;
use std::sync::Arc;

#[derive(Debug)]
pub enum FieldBuilder {
    Scalar(ScalarFieldBuilder),
    Composite(CompositeFieldBuilder),
}

impl FieldBuilder {
    pub(crate) fn build(self, ctx: &BuildContext<'_>) -> crate::Result<Field> {
        match self {
            FieldBuilder::Scalar(sf) => sf.build(ctx).map(|sf| Field::Scalar(Arc::new(sf))),
            FieldBuilder::Composite(cf) => cf.build(ctx).map(|cf| Field::Composite(Arc::new(cf))),
        }
    }
}

#[derive(Debug)]
pub struct ScalarFieldBuilder {
    pub name: String,
    pub type_identifier: TypeIdentifier,
    pub arity: FieldArity,
    pub is_id: bool,
    pub default_value: Option<PrismaValue>,
}

impl ScalarFieldBuilder {
    pub fn new(name: impl Into<String>, type_identifier: TypeIdentifier, arity: FieldArity) -> Self {
        Self {
            name: name.into(),
            type_identifier,
            arity,
            is_id: false,
            default_value: None,
        }
    }

    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<PrismaValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    fn build(self, ctx: &BuildContext<'_>) -> crate::Result<ScalarField> {
        let internal_enum = match &self.type_identifier {
            TypeIdentifier::Enum(name) => Some(ctx.internal_enum(name)?),
            _ => None,
        };

        Ok(ScalarField {
            name: self.name,
            type_identifier: self.type_identifier,
            arity: self.arity,
            is_id: self.is_id,
            internal_enum,
            default_value: self.default_value,
        })
    }
}

#[derive(Debug)]
pub struct CompositeFieldBuilder {
    pub name: String,
    pub arity: FieldArity,
    pub type_name: String,
}

impl CompositeFieldBuilder {
    pub fn new(name: impl Into<String>, arity: FieldArity, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity,
            type_name: type_name.into(),
        }
    }

    fn build(self, ctx: &BuildContext<'_>) -> crate::Result<CompositeField> {
        Ok(CompositeField {
            typ: ctx.composite_type(&self.type_name)?,
            name: self.name,
            arity: self.arity,
        })
    }
}

impl From<ScalarFieldBuilder> for FieldBuilder {
    fn from(builder: ScalarFieldBuilder) -> Self {
        FieldBuilder::Scalar(builder)
    }
}

impl From<CompositeFieldBuilder> for FieldBuilder {
    fn from(builder: CompositeFieldBuilder) -> Self {
        FieldBuilder::Composite(builder)
    }
}
