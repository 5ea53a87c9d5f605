use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Model `{}` not found", name)]
    ModelNotFound { name: String },

    #[error("Composite type `{}` not found", name)]
    CompositeTypeNotFound { name: String },

    #[error("Enum `{}` not found", name)]
    EnumNotFound { name: String },

    #[error("Field `{}` on {} `{}` not found", name, container_type, container_name)]
    FieldNotFound {
        name: String,
        container_name: String,
        container_type: &'static str,
    },

    #[error("Model `{}` has no id field", model)]
    MissingIdField { model: String },
}
