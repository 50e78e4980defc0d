//! Parse tree types.
//!
//! [`parse`](crate::parse) produces a root [`Node`] whose children are the
//! top-level declarations. State declarations (`@name(...)`) are kept verbatim
//! as [`PropertyBlock`]s, both on the root (`globals`) and on every node that
//! refers to them by state tag or by identifier. Connections always live on
//! the root.

use std::fmt;

use indexmap::IndexMap;

use nagare_core::anchor::Anchor;

use crate::span::Span;

/// Maximum container nesting. Root declarations sit at depth 0 and container
/// children at depth 1.
pub const MAX_DEPTH: usize = 1;

/// The raw text of a state declaration `@name(...)`, without the parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBlock {
    name: String,
    raw: String,
    span: Span,
}

impl PropertyBlock {
    pub fn new(name: impl Into<String>, raw: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
            span,
        }
    }

    /// The state name after `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unparsed `key: value` text between the parentheses.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Span of the whole declaration, from `@` to `)`.
    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for PropertyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}({})", self.name, self.raw)
    }
}

/// Structural role of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The implicit top of the tree.
    Root,
    /// A declaration without a body.
    Component,
    /// A declaration with a `{ ... }` body.
    Container,
}

/// A directed connection `from.anchor --> to.anchor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from_id: String,
    pub from_anchor: Anchor,
    pub to_id: String,
    pub to_anchor: Anchor,
    /// Raw property text of a trailing `( ... )` block, empty when absent.
    pub style: String,
    pub span: Span,
}

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// The type written after `:`, if any.
    pub type_name: Option<String>,
    /// The component identifier. Empty for the root.
    pub text: String,
    pub span: Span,
    pub depth: usize,
    /// The state tag written after `@`, if any.
    pub state_name: Option<String>,
    pub children: Vec<Node>,
    /// Property blocks associated with this node, keyed by state name.
    pub states: IndexMap<String, PropertyBlock>,
    /// Every state declaration in the source. Root only.
    pub globals: IndexMap<String, PropertyBlock>,
    /// Every connection in the source. Root only.
    pub connections: Vec<Connection>,
}

impl Node {
    /// Create an empty root node.
    pub fn root() -> Self {
        Self::new(NodeKind::Root, String::new(), Span::default(), 0)
    }

    /// Create a component declaration without type, state or body.
    pub fn component(text: impl Into<String>, span: Span, depth: usize) -> Self {
        Self::new(NodeKind::Component, text.into(), span, depth)
    }

    fn new(kind: NodeKind, text: String, span: Span, depth: usize) -> Self {
        Self {
            kind,
            type_name: None,
            text,
            span,
            depth,
            state_name: None,
            children: Vec::new(),
            states: IndexMap::new(),
            globals: IndexMap::new(),
            connections: Vec::new(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind == NodeKind::Container
    }

    /// Returns `true` when `block` belongs on this node: the node's state tag
    /// or its own identifier equals the block name.
    pub fn references(&self, name: &str) -> bool {
        self.kind != NodeKind::Root
            && (self.text == name || self.state_name.as_deref() == Some(name))
    }

    /// The block matched by this node's own identifier.
    pub fn own_block(&self) -> Option<&PropertyBlock> {
        self.states.get(&self.text)
    }

    /// The block matched by this node's state tag.
    pub fn state_block(&self) -> Option<&PropertyBlock> {
        self.state_name
            .as_deref()
            .and_then(|name| self.states.get(name))
    }

    /// Depth-first search for a declaration by identifier.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.children.iter().find_map(|child| {
            if child.text == id {
                Some(child)
            } else {
                child.find(id)
            }
        })
    }

    /// Number of declared components below this node, at any depth.
    pub fn component_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.component_count())
            .sum()
    }

    /// Records `block` in `states` when this node references it.
    pub(crate) fn associate(&mut self, block: &PropertyBlock) {
        if self.references(block.name()) {
            self.states.insert(block.name().to_string(), block.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str) -> PropertyBlock {
        PropertyBlock::new(name, "x:1,y:2", Span::new(0..10))
    }

    #[test]
    fn test_references_by_identifier_and_tag() {
        let mut by_id = Node::component("foo", Span::default(), 0);
        let mut by_tag = Node::component("bar", Span::default(), 0);
        by_tag.state_name = Some("foo".to_string());
        let mut unrelated = Node::component("baz", Span::default(), 0);

        for node in [&mut by_id, &mut by_tag, &mut unrelated] {
            node.associate(&block("foo"));
        }

        assert_eq!(by_id.own_block(), Some(&block("foo")));
        assert_eq!(by_tag.state_block(), Some(&block("foo")));
        assert!(unrelated.states.is_empty());
    }

    #[test]
    fn test_root_never_references() {
        let mut root = Node::root();
        root.associate(&block(""));
        assert!(root.states.is_empty());
    }

    #[test]
    fn test_find_and_count() {
        let mut container = Node::component("vps", Span::default(), 0);
        container.kind = NodeKind::Container;
        container
            .children
            .push(Node::component("nginx", Span::default(), 1));

        let mut root = Node::root();
        root.children.push(Node::component("browser", Span::default(), 0));
        root.children.push(container);

        assert_eq!(root.find("nginx").map(|n| n.depth), Some(1));
        assert!(root.find("missing").is_none());
        assert_eq!(root.component_count(), 3);
    }

    #[test]
    fn test_property_block_display() {
        assert_eq!(block("layout").to_string(), "@layout(x:1,y:2)");
    }
}
