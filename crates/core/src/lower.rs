//! Style lowering: markup aggregates become render elements.

use std::collections::BTreeSet;

use crate::SpudTextError;
use crate::document::HeadingEntry;
use crate::parse::Compilation;
use crate::slug::Slugger;
use crate::token::TokenKind;
use crate::tree::{Element, Node, NodeId, Tree};
use crate::validate::{remove_and_prune, warn_removed};

/// Ids of fixed page elements that may not exist yet.
const RESERVED_IDS: &[&str] = &["article-title", "bottom-refs"];

/// Rewrite every remaining aggregate into an element and every leaf into render-ready text.
pub(crate) fn lower(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let root = c.tree.root();

    // trimming frees whitespace leaves, so the walk order is taken afterwards
    for id in c.tree.descendants(root) {
        if c.tree.get(id).is_some_and(|node| node.kind.heading_level().is_some()) {
            c.tree.trim_edges(id);
            if c.tree[id].is_leaf() {
                warn_removed(c.logger, &c.tree, id);
                remove_and_prune(&mut c.tree, c.logger, id);
            }
        }
    }
    let order = c.tree.descendants(root);

    let mut slugger = Slugger::new();
    for id in reserved_ids(&c.tree, &order) {
        slugger.reserve(&id);
    }
    for &id in &order {
        let Some(depth) = c.tree[id].kind.heading_level() else {
            continue;
        };
        let text = c.tree.text_content(id);
        let slug = slugger.next_slug(&text);
        c.tree[id].element = Some(Element::new(heading_tag(depth)).attr("id", slug.clone()));
        c.headings.push(HeadingEntry { depth, slug, text });
    }

    for &id in order.iter().skip(1).rev() {
        lower_node(&mut c.tree, id);
    }
    Ok(())
}

/// Ids headings must not take: fixed page ids plus those earlier passes generated.
fn reserved_ids(tree: &Tree, order: &[NodeId]) -> BTreeSet<String> {
    let generated = order
        .iter()
        .filter_map(|&id| tree[id].element.as_ref()?.get("id"));
    RESERVED_IDS
        .iter()
        .copied()
        .chain(generated)
        .map(str::to_string)
        .collect()
}

fn heading_tag(depth: u8) -> &'static str {
    match depth {
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

fn lower_node(tree: &mut Tree, id: NodeId) {
    let kind = tree[id].kind;
    let tag = match kind {
        TokenKind::HtmlReady | TokenKind::HtmlContainer => return,
        TokenKind::EmAggregate | TokenKind::EmBoldAggregate => "i",
        TokenKind::BoldAggregate => "b",
        TokenKind::StrikethroughAggregate => "s",
        TokenKind::BlockquoteAggregate => "blockquote",
        TokenKind::Paragraph => "p",
        _ if kind.heading_level().is_some() => {
            tree[id].kind = TokenKind::HtmlContainer;
            return;
        }
        _ => {
            // text, newlines and unmatched markers all render as their literal text
            let node = &mut tree[id];
            node.kind = TokenKind::HtmlReady;
            node.element = None;
            return;
        }
    };

    if kind == TokenKind::EmBoldAggregate {
        let bold = tree.alloc(element_container(Element::new("b")));
        tree.move_children(id, bold);
        tree.append_child(id, bold);
    }
    let node = &mut tree[id];
    node.kind = TokenKind::HtmlContainer;
    node.element = Some(Element::new(tag));
}

fn element_container(element: Element) -> Node {
    let mut node = Node::new(TokenKind::HtmlContainer, Default::default());
    node.element = Some(element);
    node
}
