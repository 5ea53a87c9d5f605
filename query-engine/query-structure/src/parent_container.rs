use crate::{CompositeTypeRef, Field, ModelRef};

/// Anything that holds fields: a top-level model or an embedded composite type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentContainer {
    Model(ModelRef),
    CompositeType(CompositeTypeRef),
}

impl ParentContainer {
    pub fn name(&self) -> &str {
        match self {
            ParentContainer::Model(model) => &model.name,
            ParentContainer::CompositeType(ct) => &ct.name,
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            ParentContainer::Model(model) => &model.fields().all,
            ParentContainer::CompositeType(ct) => ct.fields(),
        }
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|field| field.name() == name)
    }
}

impl From<ModelRef> for ParentContainer {
    fn from(model: ModelRef) -> Self {
        ParentContainer::Model(model)
    }
}

impl From<CompositeTypeRef> for ParentContainer {
    fn from(ct: CompositeTypeRef) -> Self {
        ParentContainer::CompositeType(ct)
    }
}
