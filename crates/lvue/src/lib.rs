//! # LVue
//!
//! Template front-end compiler for the LVue component dialect.
//!
//! Turns a template string into a single-root AST with every structural
//! directive resolved, ready for a render-function generator.
//!
//! ```
//! let ast = lvue::parse("<ul v-for=\"item in items\">{{ item }}</ul>").unwrap();
//! let ul = ast.root().as_element().unwrap();
//! assert_eq!(ul.for_binding.as_ref().unwrap().iterator, "items");
//! assert!(ul.data.as_ref().unwrap().contains_key("item"));
//! ```
//!
//! ## Crates
//!
//! - [`carton`] - Shared collections and tag tables
//! - [`relief`] - AST, errors, source positions and options
//! - [`armature`] - Tokenizer and tree builder
//! - [`croquis`] - Directive analysis

use serde::Serialize;
use tracing::debug;

/// Shared collections and tag tables.
pub use lvue_carton as carton;

/// AST, errors, source positions and options.
pub use lvue_relief as relief;

/// Tokenizer and tree builder.
pub use lvue_armature as armature;

/// Directive analysis.
pub use lvue_croquis as croquis;

pub use lvue_relief::{Ast, CompilerError, ErrorCode, ErrorKind, Node, NodeId, ParserOptions};

use lvue_armature::TreeBuilder;
use lvue_croquis::{single_root, DirectiveAnalyzer};

/// Output of [`compile`]
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
    pub ast: Ast,
}

/// Parse a template with the default options.
pub fn parse(template: &str) -> Result<Ast, CompilerError> {
    parse_with_options(template, ParserOptions::default())
}

/// Parse a template: build the tree, resolve directives and require a
/// single root node.
pub fn parse_with_options(template: &str, options: ParserOptions) -> Result<Ast, CompilerError> {
    debug!(len = template.len(), "parsing template");

    let ast = build(template, &options).inspect_err(|err| {
        let code = err.code();
        debug!(?code, kind = ?code.kind(), summary = code.message(), "template rejected");
    })?;

    debug!(nodes = ast.arena().len(), "template parsed");
    Ok(ast)
}

fn build(template: &str, options: &ParserOptions) -> Result<Ast, CompilerError> {
    let analyzer = DirectiveAnalyzer::new(template, options);
    let output = TreeBuilder::with_options(template, analyzer, options).build()?;
    let root = single_root(&output.roots)?;
    Ok(Ast::new(output.arena, root))
}

/// Compile a template. Render generation happens downstream of the AST.
pub fn compile(template: &str) -> Result<CompileResult, CompilerError> {
    parse(template).map(|ast| CompileResult { ast })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_root() {
        let ast = parse("  <div></div>\n").unwrap();
        assert!(ast.root().root);
        assert!(ast.root().done);
    }

    #[test]
    fn test_compile_wraps_ast() {
        let result = compile("<p>hi</p>").unwrap();
        assert_eq!(result.ast.root().type_name(), "p");
    }

    #[test]
    fn test_empty_template() {
        let err = parse("   ").unwrap_err();
        assert!(err.to_string().contains("0 root node"));
    }

    #[test]
    fn test_rejection_summary() {
        let err = parse("<div></div><p></p>").unwrap_err();
        assert_eq!(err.code(), ErrorCode::RootNodeCount);
        assert_eq!(err.code().message(), "Template must have exactly one root node.");
    }
}
