use super::{BuildContext, CompositeFieldBuilder, FieldBuilder, ScalarFieldBuilder};
use crate::{CompositeType, CompositeTypeRef, FieldArity, TypeIdentifier};

#[derive(Debug)]
pub struct CompositeTypeBuilder {
    pub name: String,
    pub fields: Vec<FieldBuilder>,
}

impl CompositeTypeBuilder {
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

    /// Composite types may reference each other, so the types are created first
    /// and their fields are filled in once every type exists.
    pub(crate) fn build_fields(self, typ: &CompositeTypeRef, ctx: &BuildContext<'_>) -> crate::Result<()> {
        let fields = self
            .fields
            .into_iter()
            .map(|field| field.build(ctx))
            .collect::<crate::Result<Vec<_>>>()?;

        // Each type is filled exactly once by the data model builder.
        let _ = typ.fields.set(fields);

        Ok(())
    }

    pub(crate) fn shell(&self) -> CompositeType {
        CompositeType::new(self.name.clone())
    }
}
