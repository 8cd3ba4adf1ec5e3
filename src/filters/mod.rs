pub mod apply;
pub mod ast;
pub mod parser;

pub use apply::matches_filter;
pub use ast::{FilterField, SearchFilter};
pub use parser::parse_filter;
