//! LVue template AST node types.
//!
//! All nodes of a template live in an [`Arena`] and refer to each other by
//! [`NodeId`]. Children are owned by the arena; `parent` is a plain lookup
//! index, so the tree carries back-references without shared ownership.

use std::ops::{Index, IndexMut};

use lvue_carton::{FxIndexMap, SmallVec, String};
use serde::{Deserialize, Serialize, Serializer};

use crate::location::Span;

/// `type` of comment nodes
pub const COMMENT_TYPE: &str = "COMMENT";

/// `type` of doctype nodes
pub const DOCTYPE_TYPE: &str = "DOCTYPE";

/// Index of a node in its [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Attribute value: a literal string, or `true` for value-less attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    /// `<input disabled>`
    Flag,
    /// `<div class="app">`
    Text(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Text(s) => Some(s.as_str()),
        }
    }

    /// Read the value as an expression. A bare flag is the expression `true`.
    pub fn into_expression(self) -> String {
        match self {
            Self::Flag => String::const_new("true"),
            Self::Text(s) => s,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Ordered attribute table, in document order
pub type AttributeMap = FxIndexMap<String, AttributeValue>;

/// Ordered interpolation table keyed by trimmed expression
pub type InterpolationMap = FxIndexMap<String, InterpolationData>;

/// `in` / `of` keyword of a `v-for` binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IteratorType {
    In,
    Of,
}

impl IteratorType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "in" => Some(Self::In),
            "of" => Some(Self::Of),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Of => "of",
        }
    }
}

/// Resolved `v-for="result in iterator"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForBinding {
    pub iterator_type: IteratorType,
    /// The loop alias (`item`, `(item, index)`)
    pub result: String,
    /// The collection expression
    pub iterator: String,
}

/// One `{{ expr }}` occurrence in an element's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationData {
    /// The matched token including delimiters
    pub raw_token: String,
    /// Runtime value slot. Never filled in by the compiler.
    pub value: Option<String>,
}

impl InterpolationData {
    pub fn new(raw_token: impl Into<String>) -> Self {
        Self {
            raw_token: raw_token.into(),
            value: None,
        }
    }
}

/// A binding-style attribute (`:value`, `@click.prevent`, `v-bind:class`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDirective {
    /// Attribute name as written
    pub raw_name: String,
    /// Normalized directive name (`bind`, `on`, `model`, ...)
    pub name: String,
    pub arg: Option<String>,
    pub modifiers: SmallVec<[String; 2]>,
    pub value: AttributeValue,
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementNode {
    pub tag: String,
    pub attribute: AttributeMap,
    /// Binding-style attributes as tokenized. Consumed by directive analysis.
    pub v_attribute: Option<AttributeMap>,
    pub bindings: Vec<BindingDirective>,
    pub children: Vec<NodeId>,
    pub text: Option<String>,
    pub data: Option<InterpolationMap>,
    /// `v-if`
    pub if_condition: Option<String>,
    /// `v-else-if`
    pub else_if_condition: Option<String>,
    /// `v-else`
    pub is_else: bool,
    /// `v-for`
    pub for_binding: Option<ForBinding>,
    pub key: Option<String>,
    /// `v-show`
    pub show: Option<String>,
    /// `v-once`
    pub once: Option<String>,
    pub ref_name: Option<String>,
    /// Outlet this element is projected into
    pub slot: Option<String>,
    /// Name exposed by a `<slot>` outlet
    pub slot_name: Option<String>,
    /// Raw mode (`v-pre`) starts at this element
    pub pre: bool,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Whether this element starts or continues a conditional chain
    #[inline]
    pub fn has_condition(&self) -> bool {
        self.if_condition.is_some() || self.else_if_condition.is_some()
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Box<ElementNode>),
    /// Comment body, verbatim
    Comment(String),
    /// Doctype declaration body, trimmed
    Doctype(String),
}

/// A template node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Closing has been matched (leaf and void nodes are done when opened)
    pub done: bool,
    pub parent: Option<NodeId>,
    pub root: bool,
    pub span: Span,
}

impl Node {
    pub fn element(element: ElementNode, span: Span) -> Self {
        Self::with_kind(NodeKind::Element(Box::new(element)), span)
    }

    pub fn comment(value: impl Into<String>, span: Span) -> Self {
        Self::with_kind(NodeKind::Comment(value.into()), span)
    }

    pub fn doctype(value: impl Into<String>, span: Span) -> Self {
        Self::with_kind(NodeKind::Doctype(value.into()), span)
    }

    fn with_kind(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            done: false,
            parent: None,
            root: false,
            span,
        }
    }

    /// Tag name for elements, `COMMENT` / `DOCTYPE` otherwise
    pub fn type_name(&self) -> &str {
        match &self.kind {
            NodeKind::Element(el) => el.tag.as_str(),
            NodeKind::Comment(_) => COMMENT_TYPE,
            NodeKind::Doctype(_) => DOCTYPE_TYPE,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match &self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match &mut self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Comment or doctype body
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Comment(v) | NodeKind::Doctype(v) => Some(v.as_str()),
            NodeKind::Element(_) => None,
        }
    }

    #[inline]
    pub fn is_element_named(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.tag == tag)
    }

    /// Child ids in document order (empty for leaves)
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Element(el) => &el.children,
            _ => &[],
        }
    }
}

/// Storage for every node of one template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

/// A fully parsed template: the arena and its single root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    arena: Arena,
    root: NodeId,
}

impl Ast {
    pub fn new(arena: Arena, root: NodeId) -> Self {
        Self { arena, root }
    }

    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &Node {
        &self.arena[self.root]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.arena[id]
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.arena[id].parent.map(|p| &self.arena[p])
    }

    /// Children of `id` in document order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.arena[id]
            .children()
            .iter()
            .map(move |&child| &self.arena[child])
    }

    /// Follow a path of child indices from the root.
    ///
    /// `ast.at(&[1, 0])` is the first child of the root's second child.
    pub fn at(&self, path: &[usize]) -> Option<&Node> {
        let mut id = self.root;
        for &i in path {
            id = *self.arena.get(id)?.children().get(i)?;
        }
        self.arena.get(id)
    }

    /// Id counterpart of [`Ast::at`]
    pub fn id_at(&self, path: &[usize]) -> Option<NodeId> {
        let mut id = self.root;
        for &i in path {
            id = *self.arena.get(id)?.children().get(i)?;
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ast {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::element(ElementNode::new("template"), Span::new(0, 30)));
        let comment = arena.alloc(Node::comment(" hi ", Span::new(10, 21)));
        let div = arena.alloc(Node::element(ElementNode::new("div"), Span::new(21, 30)));
        arena[comment].parent = Some(root);
        arena[div].parent = Some(root);
        arena.element_mut(root).unwrap().children = vec![comment, div];
        Ast::new(arena, root)
    }

    #[test]
    fn test_type_names() {
        let ast = sample();
        let names: Vec<&str> = ast.children(ast.root_id()).map(Node::type_name).collect();
        assert_eq!(names, ["COMMENT", "div"]);
        assert_eq!(ast.root().type_name(), "template");
    }

    #[test]
    fn test_path_lookup() {
        let ast = sample();
        assert_eq!(ast.at(&[0]).and_then(Node::value), Some(" hi "));
        assert!(ast.at(&[1]).unwrap().is_element_named("div"));
        assert!(ast.at(&[2]).is_none());
        assert!(ast.at(&[0, 0]).is_none());
    }

    #[test]
    fn test_parent_lookup() {
        let ast = sample();
        let div = ast.id_at(&[1]).unwrap();
        assert_eq!(ast.parent(div).map(Node::type_name), Some("template"));
        assert!(ast.parent(ast.root_id()).is_none());
    }

    #[test]
    fn test_attribute_value_expression() {
        assert_eq!(AttributeValue::Flag.into_expression(), "true");
        assert_eq!(AttributeValue::from("ok").into_expression(), "ok");
        assert_eq!(AttributeValue::from("ok").as_str(), Some("ok"));
        assert!(AttributeValue::Flag.as_str().is_none());
    }

    #[test]
    fn test_iterator_type_keywords() {
        assert_eq!(IteratorType::from_keyword("in"), Some(IteratorType::In));
        assert_eq!(IteratorType::from_keyword("of"), Some(IteratorType::Of));
        assert_eq!(IteratorType::from_keyword("on"), None);
        assert_eq!(IteratorType::Of.as_str(), "of");
    }

    #[test]
    fn test_has_condition() {
        let mut el = ElementNode::new("p");
        assert!(!el.has_condition());
        el.else_if_condition = Some("ok".into());
        assert!(el.has_condition());
    }
}
