//! Indented text dump of a template tree.
//!
//! One line per node, two spaces per nesting level:
//!
//! ```text
//! <ul class="list"> for=(item in items)
//!   "{{ item }}"
//!   {{ item }}
//! ```
//!
//! Element lines list literal attributes inside the tag, then resolved
//! directives and bindings after it. Text is quoted with escapes, followed by
//! one line per extracted interpolation.

use std::fmt::{self, Write};

use crate::ast::{Arena, Ast, AttributeValue, ElementNode, NodeId, NodeKind};

/// Display adapter for a forest of nodes in one arena
pub struct TreeDump<'a> {
    arena: &'a Arena,
    roots: &'a [NodeId],
}

impl<'a> TreeDump<'a> {
    pub fn new(arena: &'a Arena, roots: &'a [NodeId]) -> Self {
        Self { arena, roots }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &id in self.roots {
            write_node(f, self.arena, id, 0)?;
        }
        Ok(())
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.arena(), self.root_id(), 0)
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, arena: &Arena, id: NodeId, depth: usize) -> fmt::Result {
    let node = &arena[id];
    write_indent(f, depth)?;
    match &node.kind {
        NodeKind::Comment(value) => writeln!(f, "<!--{value}-->"),
        NodeKind::Doctype(value) => writeln!(f, "<!DOCTYPE {value}>"),
        NodeKind::Element(el) => {
            write_element_line(f, el)?;
            f.write_char('\n')?;

            if let Some(text) = &el.text {
                write_indent(f, depth + 1)?;
                writeln!(f, "{:?}", text.as_str())?;
            }
            if let Some(data) = &el.data {
                for expression in data.keys() {
                    write_indent(f, depth + 1)?;
                    writeln!(f, "{{{{ {expression} }}}}")?;
                }
            }
            for &child in &el.children {
                write_node(f, arena, child, depth + 1)?;
            }
            Ok(())
        }
    }
}

fn write_element_line(f: &mut fmt::Formatter<'_>, el: &ElementNode) -> fmt::Result {
    write!(f, "<{}", el.tag)?;
    for (name, value) in &el.attribute {
        write_attr(f, name, value)?;
    }
    if let Some(v_attribute) = &el.v_attribute {
        for (name, value) in v_attribute {
            write_attr(f, name, value)?;
        }
    }
    f.write_char('>')?;

    if let Some(exp) = &el.if_condition {
        write!(f, " if={exp}")?;
    }
    if let Some(exp) = &el.else_if_condition {
        write!(f, " else-if={exp}")?;
    }
    if el.is_else {
        f.write_str(" else")?;
    }
    if let Some(binding) = &el.for_binding {
        write!(
            f,
            " for=({} {} {})",
            binding.result,
            binding.iterator_type.as_str(),
            binding.iterator
        )?;
    }
    for (label, value) in [
        ("key", &el.key),
        ("show", &el.show),
        ("once", &el.once),
        ("ref", &el.ref_name),
        ("slot", &el.slot),
        ("slot-name", &el.slot_name),
    ] {
        if let Some(value) = value {
            write!(f, " {label}={value}")?;
        }
    }
    if el.pre {
        f.write_str(" pre")?;
    }
    for binding in &el.bindings {
        match &binding.value {
            AttributeValue::Flag => write!(f, " {}", binding.raw_name)?,
            AttributeValue::Text(value) => write!(f, " {}={value}", binding.raw_name)?,
        }
    }
    Ok(())
}

fn write_attr(f: &mut fmt::Formatter<'_>, name: &str, value: &AttributeValue) -> fmt::Result {
    match value {
        AttributeValue::Flag => write!(f, " {name}"),
        AttributeValue::Text(value) => write!(f, " {name}=\"{value}\""),
    }
}
