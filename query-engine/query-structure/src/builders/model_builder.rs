use super::{BuildContext, CompositeFieldBuilder, FieldBuilder, ScalarFieldBuilder};
use crate::{FieldArity, Fields, Model, ModelRef, TypeIdentifier};
use std::sync::Arc;

#[derive(Debug)]
pub struct ModelBuilder {
    pub name: String,
    pub fields: Vec<FieldBuilder>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: impl Into<FieldBuilder>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn scalar(self, name: &str, type_identifier: TypeIdentifier, arity: FieldArity) -> Self {
        self.field(ScalarFieldBuilder::new(name, type_identifier, arity))
    }

    pub fn composite(self, name: &str, arity: FieldArity, type_name: &str) -> Self {
        self.field(CompositeFieldBuilder::new(name, arity, type_name))
    }

    pub(crate) fn build(self, ctx: &BuildContext<'_>) -> crate::Result<ModelRef> {
        let all_fields = self
            .fields
            .into_iter()
            .map(|field| field.build(ctx))
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(Arc::new(Model {
            fields: Fields::new(all_fields, self.name.clone()),
            name: self.name,
        }))
    }
}
