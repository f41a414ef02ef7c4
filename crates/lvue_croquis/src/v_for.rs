//! `v-for` binding grammar: `<alias> in|of <collection>`.
//!
//! The alias is any non-empty expression (`item`, `(item, index)`), the
//! keyword must be surrounded by whitespace, and the collection is the whole
//! remainder.

use once_cell::sync::Lazy;
use regex::Regex;

use lvue_relief::ast::{ForBinding, IteratorType};

static FOR_ALIAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.+?)\s+(in|of)\s+(.+)$").expect("invalid v-for regex literal")
});

/// Parse a `v-for` value. `None` when it does not follow the grammar.
pub fn parse_for_expression(expression: &str) -> Option<ForBinding> {
    let caps = FOR_ALIAS_RE.captures(expression.trim())?;
    let result = caps.get(1)?.as_str().trim();
    let iterator = caps.get(3)?.as_str().trim();
    if result.is_empty() || iterator.is_empty() {
        return None;
    }
    Some(ForBinding {
        iterator_type: IteratorType::from_keyword(caps.get(2)?.as_str())?,
        result: result.into(),
        iterator: iterator.into(),
    })
}
