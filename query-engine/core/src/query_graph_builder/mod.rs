//! Translation of validated request arguments into connector inputs: `WriteArgs` for the `data`
//! argument, `Filter`s for `where`.

pub mod extractors;
pub mod write;

pub use extractors::extract_filter;
pub use write::*;
