//! Relief - The sculptured AST surface for LVue templates.
//!
//! Node types, source locations, compiler errors and parser options shared
//! by the tokenizer (`lvue_armature`), the directive analysis
//! (`lvue_croquis`) and every consumer of the finished tree.

pub mod ast;
pub mod display;
pub mod errors;
pub mod location;
pub mod options;
mod serialize;

pub use ast::*;
pub use errors::{CompilerError, ErrorCode, ErrorKind, SyntaxReason};
pub use location::{Position, Span};
pub use options::ParserOptions;
pub use serialize::NodeRef;
