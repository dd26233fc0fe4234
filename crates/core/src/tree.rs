//! Arena-backed document tree.
//!
//! Nodes live in a single vector and refer to each other by [`NodeId`].
//! Removed nodes leave a hole that is recycled by the next allocation, so ids
//! of live nodes never change while passes restructure the tree.

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use crate::source::Span;
use crate::token::TokenKind;

/// Stable index of a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Render attributes synthesized by the semantic passes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name
    pub tag: &'static str,
    /// Attributes in output order; values are escaped when rendered
    pub attrs: Vec<(&'static str, String)>,
    /// Literal content of a leaf element; escaped when rendered
    pub content: Option<String>,
}

impl Element {
    /// Element with no attributes.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// Add an attribute.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Set the literal content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Value of the attribute `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// One tree element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Kind of the node
    pub kind: TokenKind,
    /// Graphemes the node was built from; empty for synthesized nodes
    pub span: Span,
    /// Literal text of text leaves
    pub text: String,
    /// Render attributes, once a pass has resolved the node
    pub element: Option<Element>,
    /// Opening marker of an aggregate
    pub opener: Option<Span>,
    /// Closing marker of an aggregate
    pub closer: Option<Span>,
    parent: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
}

impl Node {
    /// Unlinked node of `kind` covering `span`.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            text: String::new(),
            element: None,
            opener: None,
            closer: None,
            parent: None,
            prev: None,
            next: None,
            first_child: None,
            last_child: None,
        }
    }

    /// Text leaf holding `text`.
    pub fn text(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(kind, span)
        }
    }

    /// Parent node, `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Previous sibling.
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev
    }

    /// Next sibling.
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next
    }

    /// First child.
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    /// Last child.
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Source offset diagnostics should point at.
    pub fn offset(&self) -> usize {
        self.opener.map_or(self.span.start, |opener| opener.start)
    }
}

/// Arena of nodes under a single root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Tree holding only a document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new(TokenKind::Root, Span::default()))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Whether only the root is left.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Node at `id`, or `None` if it was removed.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Store an unlinked node, reusing a freed slot when one exists.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Allocate `node` and append it under `parent`.
    pub fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.alloc(node);
        self.append_child(parent, id);
        id
    }

    /// Link the detached node `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let last = self[parent].last_child;
        {
            let node = &mut self[child];
            node.parent = Some(parent);
            node.prev = last;
            node.next = None;
        }
        match last {
            Some(last) => self[last].next = Some(child),
            None => self[parent].first_child = Some(child),
        }
        self[parent].last_child = Some(child);
    }

    /// Link the detached node `child` as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        match self[parent].first_child {
            Some(first) => self.insert_before(first, child),
            None => self.append_child(parent, child),
        }
    }

    /// Link the detached node `node` right before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) {
        let parent = self[sibling].parent;
        let prev = self[sibling].prev;
        {
            let inserted = &mut self[node];
            inserted.parent = parent;
            inserted.prev = prev;
            inserted.next = Some(sibling);
        }
        self[sibling].prev = Some(node);
        match prev {
            Some(prev) => self[prev].next = Some(node),
            None => {
                if let Some(parent) = parent {
                    self[parent].first_child = Some(node);
                }
            }
        }
    }

    /// Unlink `id` from its parent and siblings. Its own subtree stays attached to it.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self[id];
            (node.parent, node.prev, node.next)
        };
        match prev {
            Some(prev) => self[prev].next = next,
            None => {
                if let Some(parent) = parent {
                    self[parent].first_child = next;
                }
            }
        }
        match next {
            Some(next) => self[next].prev = prev,
            None => {
                if let Some(parent) = parent {
                    self[parent].last_child = prev;
                }
            }
        }
        let node = &mut self[id];
        node.parent = None;
        node.prev = None;
        node.next = None;
    }

    /// Detach `id` and free it together with its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let mut child = self[current].first_child;
            while let Some(next) = child {
                stack.push(next);
                child = self[next].next;
            }
            self.nodes[current.0] = None;
            self.free.push(current);
        }
    }

    /// Free every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.child_ids(id) {
            self.remove(child);
        }
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        for child in self.child_ids(from) {
            self.detach(child);
            self.append_child(to, child);
        }
    }

    /// Snapshot of the children of `id`, safe to iterate while mutating.
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = Vec::new();
        let mut child = self[id].first_child;
        while let Some(current) = child {
            children.push(current);
            child = self[current].next;
        }
        children
    }

    /// `id` and all of its descendants in preorder.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            let mut child = self[current].last_child;
            while let Some(prev) = child {
                stack.push(prev);
                child = self[prev].prev;
            }
        }
        order
    }

    /// Concatenated literal text below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for current in self.descendants(id) {
            let node = &self[current];
            if !node.is_leaf() {
                continue;
            }
            match &node.element {
                Some(element) => text.push_str(element.content.as_deref().unwrap_or_default()),
                None => text.push_str(&node.text),
            }
        }
        text
    }

    /// Trim whitespace off the first and last text leaves of `id`, dropping leaves left empty.
    pub fn trim_edges(&mut self, id: NodeId) {
        while let Some(first) = self[id].first_child {
            let node = &mut self[first];
            if !is_text_leaf(node) {
                break;
            }
            let trimmed = node.text.trim_start();
            if trimmed.is_empty() {
                self.remove(first);
                continue;
            }
            node.text = trimmed.to_string();
            break;
        }
        while let Some(last) = self[id].last_child {
            let node = &mut self[last];
            if !is_text_leaf(node) {
                break;
            }
            let trimmed = node.text.trim_end();
            if trimmed.is_empty() {
                self.remove(last);
                continue;
            }
            node.text = trimmed.to_string();
            break;
        }
    }

    /// Indented outline of the subtree at `id`, one node per line.
    pub fn dump(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            let node = &self[current];
            let _ = write!(
                out,
                "{:indent$}{} [{}..{}]",
                "",
                node.kind.name(),
                node.span.start,
                node.span.end,
                indent = depth * 2
            );
            if let Some(element) = &node.element {
                let _ = write!(out, " <{}>", element.tag);
            }
            if !node.text.is_empty() {
                let _ = write!(out, " {:?}", short(&node.text));
            }
            out.push('\n');
            for child in self.child_ids(current).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

fn is_text_leaf(node: &Node) -> bool {
    node.is_leaf()
        && node.element.is_none()
        && matches!(node.kind, TokenKind::Text | TokenKind::HtmlReady)
}

fn short(text: &str) -> String {
    const LIMIT: usize = 24;
    match text.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    /// Panics if the node was removed.
    fn index(&self, id: NodeId) -> &Node {
        match &self.nodes[id.0] {
            Some(node) => node,
            None => panic!("node {} was removed", id.0),
        }
    }
}

impl IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.nodes[id.0] {
            Some(node) => node,
            None => panic!("node {} was removed", id.0),
        }
    }
}
