//! Directive extraction.
//!
//! Free functions that resolve the dialect's structural directives on one
//! element. Each removes the attribute it handles, so the element ends up
//! with only literal attributes plus resolved directive fields.

use lvue_carton::{is_slot_tag, is_wrapper_tag, String};
use lvue_relief::ast::{AttributeMap, AttributeValue, ElementNode};
use lvue_relief::errors::CompilerError;
use lvue_relief::location::Position;
use tracing::trace;

use crate::bindings::parse_binding_name;
use crate::v_for::parse_for_expression;

/// Message fragment used when a chained conditional has no previous node
pub const FIRST_CHILD: &str = "as the first child";

/// Snapshot of the previously completed node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevSibling {
    pub type_name: String,
    /// Carries `v-if` or `v-else-if`
    pub conditional: bool,
}

/// What an element's directives may depend on besides the element itself
#[derive(Debug, Clone)]
pub struct OpenContext<'s> {
    pub prev_sibling: Option<PrevSibling>,
    /// The open parent has a `v-for` binding
    pub parent_has_for: bool,
    source: &'s str,
    offset: usize,
}

impl<'s> OpenContext<'s> {
    pub fn new(source: &'s str, offset: usize) -> Self {
        Self {
            prev_sibling: None,
            parent_has_for: false,
            source,
            offset,
        }
    }

    /// Position of the element's start tag
    pub fn position(&self) -> Position {
        Position::locate(self.source, self.offset)
    }

    fn previous_name(&self) -> String {
        match &self.prev_sibling {
            Some(prev) => prev.type_name.clone(),
            None => String::const_new(FIRST_CHILD),
        }
    }

    fn follows_condition(&self) -> bool {
        self.prev_sibling.as_ref().is_some_and(|prev| prev.conditional)
    }
}

/// Remove a literal attribute, keeping the order of the rest.
pub fn take_attribute(element: &mut ElementNode, name: &str) -> Option<AttributeValue> {
    element.attribute.shift_remove(name)
}

/// `v-pre`: mark the element as the start of a raw subtree.
pub fn process_pre(element: &mut ElementNode) -> bool {
    if take_attribute(element, "v-pre").is_some() {
        element.pre = true;
        true
    } else {
        false
    }
}

/// Raw mode: binding-style attributes become literal attributes.
pub fn fold_raw_attributes(element: &mut ElementNode) {
    if let Some(v_attribute) = element.v_attribute.take() {
        element.attribute.extend(v_attribute);
    }
}

/// Resolve every structural directive, in a fixed order.
pub fn process_directives(
    element: &mut ElementNode,
    ctx: &OpenContext<'_>,
) -> Result<(), CompilerError> {
    process_if(element);
    process_else(element, ctx)?;
    process_else_if(element, ctx)?;
    process_for(element, ctx)?;
    process_simple(element);
    process_ref(element, ctx)?;
    process_slot(element);
    process_bindings(element);
    Ok(())
}

pub fn process_if(element: &mut ElementNode) {
    if let Some(value) = take_attribute(element, "v-if") {
        element.if_condition = Some(value.into_expression());
    }
}

pub fn process_else(element: &mut ElementNode, ctx: &OpenContext<'_>) -> Result<(), CompilerError> {
    if take_attribute(element, "v-else").is_none() {
        return Ok(());
    }
    if !ctx.follows_condition() {
        return Err(CompilerError::ElseWithoutIf {
            tag: element.tag.clone(),
            previous: ctx.previous_name(),
            position: ctx.position(),
        });
    }
    element.is_else = true;
    Ok(())
}

pub fn process_else_if(
    element: &mut ElementNode,
    ctx: &OpenContext<'_>,
) -> Result<(), CompilerError> {
    let Some(value) = take_attribute(element, "v-else-if") else {
        return Ok(());
    };
    if !ctx.follows_condition() {
        return Err(CompilerError::ElseIfWithoutIf {
            tag: element.tag.clone(),
            previous: ctx.previous_name(),
            position: ctx.position(),
        });
    }
    element.else_if_condition = Some(value.into_expression());
    Ok(())
}

pub fn process_for(element: &mut ElementNode, ctx: &OpenContext<'_>) -> Result<(), CompilerError> {
    let Some(value) = take_attribute(element, "v-for") else {
        return Ok(());
    };
    let expression = value.into_expression();
    match parse_for_expression(&expression) {
        Some(binding) => {
            trace!(
                tag = %element.tag,
                result = %binding.result,
                iterator = %binding.iterator,
                "v-for"
            );
            element.for_binding = Some(binding);
            Ok(())
        }
        None => Err(CompilerError::IllegalForExpression {
            tag: element.tag.clone(),
            expression,
            position: ctx.position(),
        }),
    }
}

/// `key`, `v-show` and `v-once`
pub fn process_simple(element: &mut ElementNode) {
    if let Some(value) = take_attribute(element, "key") {
        element.key = Some(value.into_expression());
    }
    if let Some(value) = take_attribute(element, "v-show") {
        element.show = Some(value.into_expression());
    }
    if let Some(value) = take_attribute(element, "v-once") {
        element.once = Some(value.into_expression());
    }
}

/// `ref` is not addressable inside repeated content or on the wrapper.
pub fn process_ref(element: &mut ElementNode, ctx: &OpenContext<'_>) -> Result<(), CompilerError> {
    let Some(value) = take_attribute(element, "ref") else {
        return Ok(());
    };
    if ctx.parent_has_for || is_wrapper_tag(&element.tag) {
        return Err(CompilerError::IllegalRef {
            tag: element.tag.clone(),
            position: ctx.position(),
        });
    }
    element.ref_name = Some(value.into_expression());
    Ok(())
}

/// `<slot name>` names an outlet; `slot` elsewhere targets one.
pub fn process_slot(element: &mut ElementNode) {
    if is_slot_tag(&element.tag) {
        if let Some(value) = take_attribute(element, "name") {
            element.slot_name = Some(value.into_expression());
        }
    } else if let Some(value) = take_attribute(element, "slot") {
        element.slot = Some(value.into_expression());
    }
}

/// Whatever is left in `v_attribute` becomes a binding directive, or a
/// literal attribute when the name is not binding syntax.
pub fn process_bindings(element: &mut ElementNode) {
    let Some(v_attribute) = element.v_attribute.take() else {
        return;
    };
    let mut literal = AttributeMap::default();
    for (raw_name, value) in v_attribute {
        match parse_binding_name(&raw_name) {
            Some(parsed) => element.bindings.push(parsed.into_directive(raw_name, value)),
            None => {
                literal.insert(raw_name, value);
            }
        }
    }
    element.attribute.extend(literal);
}
