use super::{BuildContext, CompositeTypeBuilder, ModelBuilder};
use crate::{InternalDataModel, InternalDataModelRef, InternalEnum};
use std::sync::Arc;

/// Assembles an [`InternalDataModel`] from models, composite types and enums.
#[derive(Debug, Default)]
pub struct InternalDataModelBuilder {
    models: Vec<ModelBuilder>,
    composite_types: Vec<CompositeTypeBuilder>,
    enums: Vec<InternalEnum>,
}

impl InternalDataModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: ModelBuilder) -> Self {
        self.models.push(model);
        self
    }

    pub fn composite_type(mut self, composite_type: CompositeTypeBuilder) -> Self {
        self.composite_types.push(composite_type);
        self
    }

    pub fn enumeration(mut self, internal_enum: InternalEnum) -> Self {
        self.enums.push(internal_enum);
        self
    }

    pub fn build(self) -> crate::Result<InternalDataModelRef> {
        let enums: Vec<_> = self.enums.into_iter().map(Arc::new).collect();
        let composite_types: Vec<_> = self
            .composite_types
            .iter()
            .map(|ct| Arc::new(ct.shell()))
            .collect();

        let ctx = BuildContext {
            composite_types: &composite_types,
            enums: &enums,
        };

        for (builder, typ) in self.composite_types.into_iter().zip(composite_types.iter()) {
            builder.build_fields(typ, &ctx)?;
        }

        let models = self
            .models
            .into_iter()
            .map(|model| model.build(&ctx))
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(Arc::new(InternalDataModel {
            models,
            composite_types,
            enums,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DomainError, FieldArity, TypeIdentifier};

    fn comment_datamodel() -> InternalDataModelRef {
        InternalDataModelBuilder::new()
            .composite_type(
                CompositeTypeBuilder::new("CommentContent")
                    .scalar("text", TypeIdentifier::String, FieldArity::Required)
                    .composite("upvotes", FieldArity::List, "CommentContentUpvotes"),
            )
            .composite_type(
                CompositeTypeBuilder::new("CommentContentUpvotes")
                    .scalar("vote", TypeIdentifier::Boolean, FieldArity::Required)
                    .scalar("userId", TypeIdentifier::String, FieldArity::Required),
            )
            .model(
                ModelBuilder::new("CommentRequiredList")
                    .field(crate::ScalarFieldBuilder::new("id", TypeIdentifier::String, FieldArity::Required).id())
                    .scalar("country", TypeIdentifier::String, FieldArity::Optional)
                    .composite("contents", FieldArity::List, "CommentContent"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn composite_types_can_reference_types_declared_later() {
        let dm = comment_datamodel();
        let content = dm.find_composite_type("CommentContent").unwrap();

        let upvotes = content.find_field("upvotes").unwrap().clone().into_composite().unwrap();
        assert_eq!(upvotes.typ().name, "CommentContentUpvotes");
        assert_eq!(upvotes.typ().fields().len(), 2);
    }

    #[test]
    fn models_keep_declaration_order_and_id() {
        let dm = comment_datamodel();
        let model = dm.find_model("CommentRequiredList").unwrap();

        let names: Vec<_> = model.fields().all.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["id", "country", "contents"]);
        assert_eq!(model.primary_identifier().unwrap().name, "id");
    }

    #[test]
    fn unknown_composite_type_is_an_error() {
        let err = InternalDataModelBuilder::new()
            .model(ModelBuilder::new("A").composite("b", FieldArity::Required, "Missing"))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::CompositeTypeNotFound {
                name: "Missing".to_owned()
            }
        );
    }
}
