mod write_args_parser;

pub use write_args_parser::*;
