mod builders;
mod composite_type;
mod error;
mod field;
mod fields;
mod internal_data_model;
mod internal_enum;
mod model;
mod parent_container;
mod write_args;

pub mod filter;

pub use builders::*;
pub use composite_type::*;
pub use error::*;
pub use field::*;
pub use fields::*;
pub use filter::*;
pub use internal_data_model::*;
pub use internal_enum::*;
pub use model::*;
pub use parent_container::*;
pub use write_args::*;

// Re-exports
pub use prisma_value::*;

pub type Result<T> = std::result::Result<T, DomainError>;
