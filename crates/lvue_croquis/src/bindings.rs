//! Binding-style attribute names.
//!
//! `:value`, `@click.prevent` and `v-bind:class` are kept as structured
//! directives for the code generator instead of literal attributes.

use lvue_carton::{SmallVec, String};
use lvue_relief::ast::{AttributeValue, BindingDirective};

/// A parsed binding attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingName {
    /// Normalized directive name (`bind`, `on`, `model`, ...)
    pub name: String,
    pub arg: Option<String>,
    pub modifiers: SmallVec<[String; 2]>,
}

impl BindingName {
    pub fn into_directive(self, raw_name: String, value: AttributeValue) -> BindingDirective {
        BindingDirective {
            raw_name,
            name: self.name,
            arg: self.arg,
            modifiers: self.modifiers,
            value,
        }
    }
}

/// Parse `:arg.mod`, `@arg.mod` or `v-name:arg.mod`.
///
/// Returns `None` for names that only happen to contain `:` (`xlink:href`).
pub fn parse_binding_name(raw: &str) -> Option<BindingName> {
    let (name, rest) = if let Some(rest) = raw.strip_prefix(':') {
        ("bind", rest)
    } else if let Some(rest) = raw.strip_prefix('@') {
        ("on", rest)
    } else if let Some(rest) = raw.strip_prefix("v-") {
        // Find end of directive name (before : or .)
        let end = rest.find([':', '.']).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        match rest[end..].strip_prefix(':') {
            Some(arg) => (&rest[..end], arg),
            None => {
                return Some(BindingName {
                    name: rest[..end].into(),
                    arg: None,
                    modifiers: split_modifiers(&rest[end..]),
                });
            }
        }
    } else {
        return None;
    };

    let arg_end = rest.find('.').unwrap_or(rest.len());
    let arg = &rest[..arg_end];
    Some(BindingName {
        name: name.into(),
        arg: (!arg.is_empty()).then(|| arg.into()),
        modifiers: split_modifiers(&rest[arg_end..]),
    })
}

fn split_modifiers(rest: &str) -> SmallVec<[String; 2]> {
    rest.split('.')
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}
