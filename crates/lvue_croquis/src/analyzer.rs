//! Directive analysis driven by the tree builder's events.
//!
//! The analyzer owns the traversal context: the open-parent stack, the
//! previously completed node (document order, not nesting) and the owner of
//! the current raw (`v-pre`) subtree.

use lvue_armature::Callbacks;
use lvue_carton::String;
use lvue_relief::ast::{Arena, ElementNode, NodeId};
use lvue_relief::errors::CompilerError;
use lvue_relief::options::ParserOptions;
use tracing::trace;

use crate::directives::{self, OpenContext, PrevSibling};
use crate::interpolation::extract_interpolations;

/// Resolves directives on open and interpolation on close
#[derive(Debug)]
pub struct DirectiveAnalyzer<'s> {
    source: &'s str,
    parents: Vec<NodeId>,
    prev_sibling: Option<NodeId>,
    raw_root: Option<NodeId>,
    delimiters: (String, String),
    is_raw_text_tag: fn(&str) -> bool,
}

impl<'s> DirectiveAnalyzer<'s> {
    pub fn new(source: &'s str, options: &ParserOptions) -> Self {
        Self {
            source,
            parents: Vec::new(),
            prev_sibling: None,
            raw_root: None,
            delimiters: options.delimiters.clone(),
            is_raw_text_tag: options.is_raw_text_tag,
        }
    }

    /// Inside a `v-pre` subtree
    #[inline]
    pub fn in_raw_mode(&self) -> bool {
        self.raw_root.is_some()
    }

    fn open_context(&self, arena: &Arena, parent: Option<NodeId>, id: NodeId) -> OpenContext<'s> {
        let mut ctx = OpenContext::new(self.source, arena[id].span.start as usize);
        ctx.prev_sibling = self.prev_sibling.map(|prev| {
            let node = &arena[prev];
            PrevSibling {
                type_name: node.type_name().into(),
                conditional: node.as_element().is_some_and(ElementNode::has_condition),
            }
        });
        ctx.parent_has_for = parent
            .and_then(|p| arena.element(p))
            .is_some_and(|el| el.for_binding.is_some());
        ctx
    }

    /// Drop raw mode once its owner is no longer an open ancestor.
    fn settle_raw_mode(&mut self, closing: NodeId) {
        if let Some(owner) = self.raw_root {
            if owner != closing && !self.parents.contains(&owner) {
                self.raw_root = None;
            }
        }
    }
}

impl Callbacks for DirectiveAnalyzer<'_> {
    fn on_open(&mut self, arena: &mut Arena, id: NodeId) -> Result<(), CompilerError> {
        let parent = self.parents.last().copied();
        let ctx = self.open_context(arena, parent, id);

        let node = &mut arena[id];
        node.parent = parent;
        node.root = parent.is_none();
        let done = node.done;

        if let Some(element) = node.as_element_mut() {
            if self.raw_root.is_none() && directives::process_pre(element) {
                trace!(tag = %element.tag, "raw mode on");
                self.raw_root = Some(id);
            }

            if self.raw_root.is_some() || (self.is_raw_text_tag)(&element.tag) {
                directives::fold_raw_attributes(element);
            } else {
                directives::process_directives(element, &ctx)?;
            }

            if !done {
                self.parents.push(id);
            }
        }

        if done {
            self.prev_sibling = Some(id);
            if self.raw_root == Some(id) {
                self.raw_root = None;
            }
        }
        Ok(())
    }

    fn on_close(&mut self, arena: &mut Arena, id: NodeId) -> Result<(), CompilerError> {
        if let Some(at) = self.parents.iter().rposition(|&p| p == id) {
            self.parents.truncate(at);
        }
        self.prev_sibling = Some(id);
        self.settle_raw_mode(id);

        let raw = self.in_raw_mode();
        let (open, close) = (&self.delimiters.0, &self.delimiters.1);
        if let Some(element) = arena.element_mut(id) {
            if !raw && !(self.is_raw_text_tag)(&element.tag) {
                let found = element
                    .text
                    .as_deref()
                    .and_then(|text| extract_interpolations(text, open, close));
                if let Some(found) = found {
                    trace!(tag = %element.tag, count = found.len(), "interpolation");
                    element.data.get_or_insert_with(Default::default).extend(found);
                }
            }
        }

        if self.raw_root == Some(id) {
            trace!("raw mode off");
            self.raw_root = None;
        }
        Ok(())
    }
}

/// The finished forest must have exactly one top-level node.
pub fn single_root(roots: &[NodeId]) -> Result<NodeId, CompilerError> {
    match roots {
        [root] => Ok(*root),
        _ => Err(CompilerError::RootNodeCount { count: roots.len() }),
    }
}
