//! JSON shape of the tree handed to code generators.
//!
//! Nodes serialize as nested maps with the dialect's field names (`type`,
//! `elseIf`, `slotName`, ...). `parent` links are left out so the output is a
//! plain tree; optional fields are omitted when unset.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::ast::{Arena, Ast, ElementNode, NodeId, NodeKind};

/// A node together with the arena it lives in
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    pub arena: &'a Arena,
    pub id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn new(arena: &'a Arena, id: NodeId) -> Self {
        Self { arena, id }
    }
}

struct Children<'a> {
    arena: &'a Arena,
    ids: &'a [NodeId],
}

impl Serialize for Children<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.ids.len()))?;
        for &id in self.ids {
            seq.serialize_element(&NodeRef::new(self.arena, id))?;
        }
        seq.end()
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = &self.arena[self.id];
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", node.type_name())?;
        map.serialize_entry("done", &node.done)?;
        map.serialize_entry("root", &node.root)?;
        match &node.kind {
            NodeKind::Comment(value) | NodeKind::Doctype(value) => {
                map.serialize_entry("value", value)?;
            }
            NodeKind::Element(el) => {
                serialize_element(&mut map, self.arena, el)?;
            }
        }
        map.end()
    }
}

fn serialize_element<M: SerializeMap>(
    map: &mut M,
    arena: &Arena,
    el: &ElementNode,
) -> Result<(), M::Error> {
    map.serialize_entry("attribute", &el.attribute)?;
    if let Some(v_attribute) = &el.v_attribute {
        map.serialize_entry("vAttribute", v_attribute)?;
    }
    map.serialize_entry(
        "children",
        &Children {
            arena,
            ids: &el.children,
        },
    )?;
    if let Some(text) = &el.text {
        map.serialize_entry("text", text)?;
    }
    if let Some(data) = &el.data {
        map.serialize_entry("data", data)?;
    }
    if let Some(exp) = &el.if_condition {
        map.serialize_entry("if", exp)?;
    }
    if let Some(exp) = &el.else_if_condition {
        map.serialize_entry("elseIf", exp)?;
    }
    if el.is_else {
        map.serialize_entry("else", &true)?;
    }
    if let Some(binding) = &el.for_binding {
        map.serialize_entry("for", binding)?;
    }
    for (key, value) in [
        ("key", &el.key),
        ("show", &el.show),
        ("once", &el.once),
        ("ref", &el.ref_name),
        ("slot", &el.slot),
        ("slotName", &el.slot_name),
    ] {
        if let Some(value) = value {
            map.serialize_entry(key, value)?;
        }
    }
    if el.pre {
        map.serialize_entry("pre", &true)?;
    }
    if !el.bindings.is_empty() {
        map.serialize_entry("bindings", &el.bindings)?;
    }
    Ok(())
}

impl Serialize for Ast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRef::new(self.arena(), self.root_id()).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AttributeValue, InterpolationData, Node};
    use crate::location::Span;
    use serde_json::json;

    #[test]
    fn test_element_json_shape() {
        let mut arena = Arena::new();
        let comment = arena.alloc(Node::comment(" c ", Span::default()));
        arena[comment].done = true;

        let mut div = ElementNode::new("div");
        div.attribute.insert("aria-hidden".into(), AttributeValue::Flag);
        div.attribute.insert("class".into(), "box".into());
        div.text = Some("{{ msg }}".into());
        div.data
            .get_or_insert_with(Default::default)
            .insert("msg".into(), InterpolationData::new("{{ msg }}"));
        div.is_else = true;
        div.slot = Some("header".into());
        div.children.push(comment);
        let root = arena.alloc(Node::element(div, Span::default()));
        arena[root].done = true;
        arena[root].root = true;

        let value = serde_json::to_value(Ast::new(arena, root)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "div",
                "done": true,
                "root": true,
                "attribute": { "aria-hidden": true, "class": "box" },
                "children": [
                    { "type": "COMMENT", "done": true, "root": false, "value": " c " }
                ],
                "text": "{{ msg }}",
                "data": { "msg": { "rawToken": "{{ msg }}", "value": null } },
                "else": true,
                "slot": "header",
            })
        );
    }
}
