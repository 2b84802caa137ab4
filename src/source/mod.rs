//! The reference source adapter: a small hand-rolled reader for a
//! C/Swift-like subset, implementing the `host` traits so the façade and
//! CLI are runnable end to end (§6).

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{ExprNode, FunctionDecl, ParsedFile};
pub use parser::{parse_source_file, parse_source_str};
