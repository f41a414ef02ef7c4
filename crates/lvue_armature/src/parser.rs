//! LVue template tree builder.
//!
//! Drives the [`Scanner`] over the source and builds a forest of nodes with a
//! single explicit stack. As constructs are recognized the builder emits
//! events to its [`Callbacks`]:
//!
//! - `on_open` when a start tag (after its attributes), a comment or a doctype
//!   has been read. Void elements and leaves are already `done` here.
//! - `on_close` when an end tag has been matched and the element's children
//!   are attached.
//!
//! Whatever remains on the stack when the source is exhausted is the
//! top-level forest.

use lvue_relief::ast::{Arena, AttributeMap, AttributeValue, ElementNode, Node, NodeId};
use lvue_relief::errors::{CompilerError, SyntaxReason};
use lvue_relief::location::{Position, Span};
use lvue_relief::options::ParserOptions;
use tracing::{debug, trace};

use crate::tokenizer::{
    has_closing_tag, is_binding_name, match_attribute, match_comment, match_doctype,
    match_end_tag, match_start_tag_open, match_tag_close, match_text, Attribute, Scanner,
};

/// Receivers of the builder's open/close events.
///
/// Callbacks may mutate any node through the arena; an error aborts the
/// build immediately.
pub trait Callbacks {
    fn on_open(&mut self, arena: &mut Arena, id: NodeId) -> Result<(), CompilerError>;
    fn on_close(&mut self, arena: &mut Arena, id: NodeId) -> Result<(), CompilerError>;
}

/// Callbacks that ignore every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallbacks;

impl Callbacks for NoopCallbacks {
    fn on_open(&mut self, _arena: &mut Arena, _id: NodeId) -> Result<(), CompilerError> {
        Ok(())
    }

    fn on_close(&mut self, _arena: &mut Arena, _id: NodeId) -> Result<(), CompilerError> {
        Ok(())
    }
}

/// Result of a build: every node, the top-level forest, and the callbacks
/// handed back to the caller.
#[derive(Debug)]
pub struct ParseOutput<C> {
    pub arena: Arena,
    pub roots: Vec<NodeId>,
    pub callbacks: C,
}

/// Stack-based tree builder
pub struct TreeBuilder<'s, C: Callbacks> {
    scanner: Scanner<'s>,
    arena: Arena,
    /// In-progress and completed nodes; the bottom is the top-level forest
    stack: Vec<NodeId>,
    callbacks: C,
    comments: bool,
}

impl<'s, C: Callbacks> TreeBuilder<'s, C> {
    pub fn new(source: &'s str, callbacks: C) -> Self {
        Self::with_options(source, callbacks, &ParserOptions::default())
    }

    pub fn with_options(source: &'s str, callbacks: C, options: &ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            arena: Arena::new(),
            stack: Vec::new(),
            callbacks,
            comments: options.comments,
        }
    }

    /// Consume the whole source
    pub fn build(mut self) -> Result<ParseOutput<C>, CompilerError> {
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.is_eof() {
                break;
            }
            self.step()?;
        }

        trace!(
            nodes = self.arena.len(),
            roots = self.stack.len(),
            "tree built"
        );
        Ok(ParseOutput {
            arena: self.arena,
            roots: self.stack,
            callbacks: self.callbacks,
        })
    }

    /// Recognize one construct at the cursor, in priority order
    fn step(&mut self) -> Result<(), CompilerError> {
        let rest = self.scanner.rest();
        let start = self.scanner.pos();

        if let Some((len, value)) = match_doctype(rest) {
            let node = Node::doctype(value, Span::from_range(start, start + len));
            return self.open_leaf(node, len);
        }

        if let Some((len, value)) = match_comment(rest) {
            if !self.comments {
                self.scanner.advance(len);
                return Ok(());
            }
            let node = Node::comment(value, Span::from_range(start, start + len));
            return self.open_leaf(node, len);
        }

        if let Some((len, tag)) = match_start_tag_open(rest) {
            return self.open_tag(tag, len);
        }

        if let Some((len, tag)) = match_end_tag(rest) {
            return self.close_tag(tag, len);
        }

        if let Some(len) = match_text(rest) {
            return self.text(&rest[..len]);
        }

        Err(self.illegal(SyntaxReason::UnexpectedContent, start))
    }

    fn open_leaf(&mut self, node: Node, len: usize) -> Result<(), CompilerError> {
        self.scanner.advance(len);
        let id = self.arena.alloc(node);
        mark_done(&mut self.arena[id]);
        self.stack.push(id);
        trace!(kind = self.arena[id].type_name(), "open leaf");
        self.callbacks.on_open(&mut self.arena, id)
    }

    fn open_tag(&mut self, tag: &'s str, len: usize) -> Result<(), CompilerError> {
        let start = self.scanner.pos();
        let paired = has_closing_tag(self.scanner.rest(), tag);
        self.scanner.advance(len);

        let mut element = ElementNode::new(tag);
        loop {
            self.scanner.skip_whitespace();
            let rest = self.scanner.rest();
            if let Some((close_len, _)) = match_tag_close(rest) {
                self.scanner.advance(close_len);
                break;
            }
            if rest.is_empty() {
                let reason = SyntaxReason::UnterminatedTag { tag: tag.into() };
                return Err(self.illegal(reason, start));
            }
            let Some((attr_len, attr)) = match_attribute(rest) else {
                let pos = self.scanner.pos();
                return Err(self.illegal(SyntaxReason::MalformedAttribute, pos));
            };
            set_attribute(&mut element, attr);
            self.scanner.advance(attr_len);
        }

        let span = Span::from_range(start, self.scanner.pos());
        let id = self.arena.alloc(Node::element(element, span));
        if !paired {
            mark_done(&mut self.arena[id]);
        }
        self.stack.push(id);
        trace!(tag, paired, "open tag");
        self.callbacks.on_open(&mut self.arena, id)
    }

    fn close_tag(&mut self, tag: &'s str, len: usize) -> Result<(), CompilerError> {
        let start = self.scanner.pos();
        let mut popped = Vec::new();

        loop {
            let Some(id) = self.stack.pop() else {
                let reason = SyntaxReason::UnmatchedEndTag { tag: tag.into() };
                return Err(self.illegal(reason, start));
            };

            // A done node with the same name (e.g. a void child) is not the match.
            let node = &self.arena[id];
            if node.done || !node.is_element_named(tag) {
                popped.push(id);
                continue;
            }

            self.scanner.advance(len);
            let node = &mut self.arena[id];
            set_children(node, popped);
            node.span.end = self.scanner.pos() as u32;
            mark_done(node);
            self.stack.push(id);
            trace!(tag, "close tag");
            return self.callbacks.on_close(&mut self.arena, id);
        }
    }

    /// Attach a text run to the nearest element that is still open, or to the
    /// topmost element on the stack once every element has been closed.
    fn text(&mut self, run: &'s str) -> Result<(), CompilerError> {
        let start = self.scanner.pos();
        let is_element = |id: &NodeId| self.arena[*id].as_element().is_some();
        let owner = self
            .stack
            .iter()
            .rev()
            .copied()
            .find(|id| is_element(id) && !self.arena[*id].done)
            .or_else(|| self.stack.iter().rev().copied().find(is_element));
        let Some(element) = owner.and_then(|id| self.arena.element_mut(id)) else {
            return Err(self.illegal(SyntaxReason::StrayText, start));
        };
        append_text(element, run.trim());
        self.scanner.advance(run.len());
        Ok(())
    }

    fn illegal(&self, reason: SyntaxReason, offset: usize) -> CompilerError {
        let position = Position::locate(self.scanner.source(), offset);
        debug!(%reason, %position, "template string is illegal");
        CompilerError::illegal(reason, position)
    }
}

fn mark_done(node: &mut Node) {
    node.done = true;
}

/// File an attribute under `attribute`, or under `v_attribute` when its name
/// has binding syntax. Later duplicates overwrite earlier ones.
fn set_attribute(element: &mut ElementNode, attr: Attribute<'_>) {
    let value = attr.value.map_or(AttributeValue::Flag, AttributeValue::from);
    if is_binding_name(attr.name) {
        element
            .v_attribute
            .get_or_insert_with(AttributeMap::default)
            .insert(attr.name.into(), value);
    } else {
        element.attribute.insert(attr.name.into(), value);
    }
}

/// `popped` is in stack-pop order, the reverse of document order.
fn set_children(node: &mut Node, mut popped: Vec<NodeId>) {
    popped.reverse();
    if let Some(element) = node.as_element_mut() {
        element.children = popped;
    }
}

fn append_text(element: &mut ElementNode, text: &str) {
    match &mut element.text {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(text);
        }
        None => element.text = Some(text.into()),
    }
}

/// Tokenize and build the raw forest without any directive processing.
pub fn parse_html(source: &str) -> Result<ParseOutput<NoopCallbacks>, CompilerError> {
    TreeBuilder::new(source, NoopCallbacks).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lvue_relief::display::TreeDump;
    use lvue_relief::errors::ErrorCode;

    fn parse(source: &str) -> ParseOutput<NoopCallbacks> {
        match parse_html(source) {
            Ok(output) => output,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    fn child(output: &ParseOutput<NoopCallbacks>, id: NodeId, index: usize) -> NodeId {
        output.arena[id].children()[index]
    }

    #[test]
    fn test_single_doctype() {
        let output = parse("<!DOCTYPE HTML>");
        assert_eq!(output.roots.len(), 1);
        let node = &output.arena[output.roots[0]];
        assert_eq!(node.type_name(), "DOCTYPE");
        assert_eq!(node.value(), Some("HTML"));
        assert!(node.done);
    }

    #[test]
    fn test_single_comment() {
        let output = parse("<!-- aaaaaa -->");
        let node = &output.arena[output.roots[0]];
        assert_eq!(node.type_name(), "COMMENT");
        assert_eq!(node.value(), Some(" aaaaaa "));
    }

    #[test]
    fn test_comments_can_be_dropped() {
        let options = ParserOptions {
            comments: false,
            ..ParserOptions::default()
        };
        let output = TreeBuilder::with_options("<div><!-- x --></div>", NoopCallbacks, &options)
            .build()
            .unwrap();
        assert_eq!(output.roots.len(), 1);
        assert!(output.arena[output.roots[0]].children().is_empty());
    }

    #[test]
    fn test_single_element_text() {
        let output = parse("<html> aaa </html>");
        let node = &output.arena[output.roots[0]];
        assert_eq!(node.type_name(), "html");
        assert_eq!(node.as_element().unwrap().text.as_deref(), Some("aaa"));
        assert!(node.done);
    }

    #[test]
    fn test_children_in_document_order() {
        let output = parse(
            "<body><div>This is a div<img /></div><span>This is a span</span>\
            <!-- This is a piece of comment --></body>",
        );
        let body = output.roots[0];
        let div = child(&output, body, 0);
        let img = child(&output, div, 0);
        let span = child(&output, body, 1);
        let comment = child(&output, body, 2);

        assert_eq!(output.arena[body].type_name(), "body");
        assert_eq!(output.arena[div].type_name(), "div");
        assert_eq!(output.arena[img].type_name(), "img");
        assert_eq!(output.arena[span].type_name(), "span");
        assert_eq!(output.arena[comment].type_name(), "COMMENT");
        assert_eq!(
            output.arena.element(div).unwrap().text.as_deref(),
            Some("This is a div")
        );
        assert_eq!(
            output.arena.element(span).unwrap().text.as_deref(),
            Some("This is a span")
        );
        assert_eq!(
            output.arena[comment].value(),
            Some(" This is a piece of comment ")
        );
    }

    #[test]
    fn test_full_document_with_attributes() {
        let source = "<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n.container { height: 200px; }\n\
            </style>\n<script src=\"http://bootcdn/bootstrap/bootstrap.js\">\n</script>\n</head>\n<body>\n<div class=\"container\">\n\
            This is a div</div><div class=\"container\" aria-hidden @click=\"goHome()\">\n\
            <img src=\"http://xxx\"/><div class=\"internal\" v-bind:class=\"name\" @click.prevent=\"goHome()\">This is internal div\
            </div></div></body></html>";
        let output = parse(source);
        assert_eq!(output.roots.len(), 2);
        assert_eq!(output.arena[output.roots[0]].value(), Some("HTML"));

        let html = output.roots[1];
        let head = child(&output, html, 0);
        assert_eq!(output.arena[head].children().len(), 3);

        let meta = &output.arena[child(&output, head, 0)];
        assert!(meta.done);
        assert_eq!(
            meta.as_element().unwrap().attribute.get("charset"),
            Some(&AttributeValue::from("utf-8"))
        );

        let style = output.arena.element(child(&output, head, 1)).unwrap();
        assert_eq!(style.text.as_deref(), Some(".container { height: 200px; }"));

        let script = &output.arena[child(&output, head, 2)];
        assert!(script.done);
        assert_eq!(
            script.as_element().unwrap().attribute.get("src"),
            Some(&AttributeValue::from("http://bootcdn/bootstrap/bootstrap.js"))
        );

        let body = child(&output, html, 1);
        assert_eq!(output.arena[body].children().len(), 2);

        let second = output.arena.element(child(&output, body, 1)).unwrap();
        assert_eq!(
            second.attribute.get("aria-hidden"),
            Some(&AttributeValue::Flag)
        );
        let v_attribute = second.v_attribute.as_ref().unwrap();
        assert_eq!(
            v_attribute.get("@click"),
            Some(&AttributeValue::from("goHome()"))
        );

        let internal = output
            .arena
            .element(child(&output, child(&output, body, 1), 1))
            .unwrap();
        assert_eq!(internal.text.as_deref(), Some("This is internal div"));
        let names: Vec<&str> = internal
            .v_attribute
            .as_ref()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(names, ["v-bind:class", "@click.prevent"]);
    }

    #[test]
    fn test_void_without_closing_tag_has_no_children() {
        let output = parse("<div><input type=\"text\"><span></span></div>");
        let div = output.roots[0];
        let input = &output.arena[child(&output, div, 0)];
        assert!(input.done);
        assert!(input.children().is_empty());
        assert_eq!(output.arena[div].children().len(), 2);
    }

    #[test]
    fn test_end_tag_never_reopens_done_element() {
        let err = parse_html("<section><p></p></p></section>").unwrap_err();
        assert!(err.to_string().contains("unmatched </p>"));
    }

    #[test]
    fn test_text_is_owned_by_enclosing_element() {
        let output = parse("<ul><li>a</li>b <br> c</ul>");
        let ul = output.arena.element(output.roots[0]).unwrap();
        assert_eq!(ul.text.as_deref(), Some("b c"));
        let li = output.arena.element(ul.children[0]).unwrap();
        assert_eq!(li.text.as_deref(), Some("a"));
    }

    #[test]
    fn test_spans() {
        let output = parse("  <div id=\"a\"><br></div>");
        let div = &output.arena[output.roots[0]];
        assert_eq!(div.span, Span::new(2, 24));
        let br = &output.arena[div.children()[0]];
        assert_eq!(br.span, Span::new(14, 18));
    }

    #[test]
    fn test_dump_snapshot() {
        let output = parse(
            "<div class=\"box\" @click=\"go\"><!-- note --><p>hi</p><img src=\"a.png\"></div>",
        );
        insta::assert_snapshot!(TreeDump::new(&output.arena, &output.roots).to_string(), @r#"
        <div class="box" @click="go">
          <!-- note -->
          <p>
            "hi"
          <img src="a.png">
        "#);
    }

    #[test]
    fn test_unmatched_end_tag() {
        let err = parse_html("<html></div>").unwrap_err();
        assert_eq!(err.code(), ErrorCode::IllegalTemplate);
        assert!(err.to_string().contains("template string is illegal"));
        assert!(err.to_string().contains("unmatched </div>"));
    }

    #[test]
    fn test_malformed_attribute() {
        let err = parse_html("<div class=\"aaa></div>").unwrap_err();
        assert!(err.to_string().contains("template string is illegal"));
        assert_eq!(err.position().map(|p| p.column), Some(11));
    }

    #[test]
    fn test_unterminated_tag() {
        let err = parse_html("<div class=\"a\"").unwrap_err();
        assert!(matches!(
            err,
            CompilerError::IllegalTemplate {
                reason: SyntaxReason::UnterminatedTag { .. },
                ..
            }
        ));
    }

    /// Runs are trimmed and joined with one space on their owner.
    #[test]
    fn test_text_after_closed_root_goes_to_stack_top() {
        let output = parse("<div>a</div> trailing");
        assert_eq!(output.roots.len(), 1);
        let div = output.arena.element(output.roots[0]).unwrap();
        assert_eq!(div.text.as_deref(), Some("a trailing"));
    }

    #[test]
    fn test_text_after_void_root() {
        let output = parse("<input> caption");
        let input = &output.arena[output.roots[0]];
        assert!(input.done);
        assert_eq!(input.as_element().unwrap().text.as_deref(), Some("caption"));
    }

    #[test]
    fn test_text_before_any_element() {
        let err = parse_html("hello<div></div>").unwrap_err();
        assert!(matches!(
            err,
            CompilerError::IllegalTemplate {
                reason: SyntaxReason::StrayText,
                ..
            }
        ));

        let err = parse_html("<!-- c --> hello").unwrap_err();
        assert!(err.to_string().contains("text outside of any element"));
    }

    #[test]
    fn test_slash_in_text_is_illegal() {
        let err = parse_html("<p>a/b</p>").unwrap_err();
        assert!(err.to_string().contains("template string is illegal"));
    }

    #[test]
    fn test_callbacks_see_open_and_close() {
        #[derive(Default)]
        struct Recorder(Vec<String>);

        impl Callbacks for Recorder {
            fn on_open(&mut self, arena: &mut Arena, id: NodeId) -> Result<(), CompilerError> {
                let node = &arena[id];
                self.0.push(format!("open {} done={}", node.type_name(), node.done));
                Ok(())
            }

            fn on_close(&mut self, arena: &mut Arena, id: NodeId) -> Result<(), CompilerError> {
                let node = &arena[id];
                let children = node.children().len();
                self.0.push(format!("close {} children={children}", node.type_name()));
                Ok(())
            }
        }

        let output = TreeBuilder::new("<div><br><!--c--><p></p></div>", Recorder::default())
            .build()
            .unwrap();
        assert_eq!(
            output.callbacks.0,
            [
                "open div done=false",
                "open br done=true",
                "open COMMENT done=true",
                "open p done=false",
                "close p children=0",
                "close div children=3",
            ]
        );
    }
}
