use crate::*;
use std::sync::Arc;

pub type InternalDataModelRef = Arc<InternalDataModel>;

#[derive(Debug)]
pub struct InternalDataModel {
    pub(crate) models: Vec<ModelRef>,
    pub(crate) composite_types: Vec<CompositeTypeRef>,
    pub(crate) enums: Vec<InternalEnumRef>,
}

impl InternalDataModel {
    pub fn models(&self) -> &[ModelRef] {
        &self.models
    }

    pub fn composite_types(&self) -> &[CompositeTypeRef] {
        &self.composite_types
    }

    pub fn enums(&self) -> &[InternalEnumRef] {
        &self.enums
    }

    pub fn find_model(&self, name: &str) -> crate::Result<ModelRef> {
        self.models
            .iter()
            .find(|model| model.name == name)
            .cloned()
            .ok_or_else(|| DomainError::ModelNotFound { name: name.to_string() })
    }

    pub fn find_composite_type(&self, name: &str) -> crate::Result<CompositeTypeRef> {
        self.composite_types
            .iter()
            .find(|ct| ct.name == name)
            .cloned()
            .ok_or_else(|| DomainError::CompositeTypeNotFound { name: name.to_string() })
    }

    pub fn find_enum(&self, name: &str) -> crate::Result<InternalEnumRef> {
        self.enums
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .ok_or_else(|| DomainError::EnumNotFound { name: name.to_string() })
    }
}
