//! Compiler options.

use lvue_carton::String;

/// Parser options
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Delimiters for interpolation (default: ["{{", "}}"])
    pub delimiters: (String, String),
    /// Keep comment nodes in the tree
    pub comments: bool,
    /// Whether a tag holds literal content (no directives, no interpolation)
    pub is_raw_text_tag: fn(&str) -> bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            delimiters: (String::from("{{"), String::from("}}")),
            comments: true,
            is_raw_text_tag: lvue_carton::is_raw_text_tag,
        }
    }
}
