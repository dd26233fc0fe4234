//! HTML serialization of the render tree.

use crate::token::TokenKind;
use crate::tree::{Element, NodeId, Tree};

/// Elements written as `<tag .../>` with no content.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr"];

enum Step {
    Enter(NodeId),
    Exit(&'static str),
}

/// Serialize the subtree at `id`, leaving out the subtree at `skip`.
///
/// Uses an explicit stack, so arbitrarily deep trees cannot overflow.
pub fn render(tree: &Tree, id: NodeId, skip: Option<NodeId>) -> String {
    let mut out = String::new();
    let mut stack = vec![Step::Enter(id)];

    while let Some(step) = stack.pop() {
        let current = match step {
            Step::Exit(tag) => {
                push_close(&mut out, tag);
                continue;
            }
            Step::Enter(current) if Some(current) == skip => continue,
            Step::Enter(current) => current,
        };
        let node = &tree[current];

        match &node.element {
            Some(element) if node.kind == TokenKind::HtmlContainer || !node.is_leaf() => {
                push_open(&mut out, element);
                stack.push(Step::Exit(element.tag));
            }
            Some(element) => {
                push_open_leaf(&mut out, element);
                continue;
            }
            None if node.is_leaf() => {
                out.push_str(&html_escape::encode_text(&node.text));
                continue;
            }
            None => {}
        }

        let children = tree.child_ids(current);
        stack.extend(children.into_iter().rev().map(Step::Enter));
    }
    out
}

fn push_attrs(out: &mut String, element: &Element) {
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
}

fn push_open(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag);
    push_attrs(out, element);
    out.push('>');
}

fn push_close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_open_leaf(out: &mut String, element: &Element) {
    if VOID_ELEMENTS.contains(&element.tag) {
        out.push('<');
        out.push_str(element.tag);
        push_attrs(out, element);
        out.push_str("/>");
        return;
    }
    push_open(out, element);
    if let Some(content) = &element.content {
        out.push_str(&html_escape::encode_text(content));
    }
    push_close(out, element.tag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Span;
    use crate::tree::Node;

    fn element_node(kind: TokenKind, element: Element) -> Node {
        let mut node = Node::new(kind, Span::default());
        node.element = Some(element);
        node
    }

    #[test]
    fn escapes_text_and_attributes() {
        let mut tree = Tree::new();
        let root = tree.root();
        let p = tree.push(root, element_node(TokenKind::HtmlContainer, Element::new("p")));
        tree.push(p, Node::text(TokenKind::HtmlReady, Span::default(), "a < b & c > d"));
        tree.push(
            p,
            element_node(
                TokenKind::HtmlReady,
                Element::new("a").attr("href", "x\"y").content("<go>"),
            ),
        );
        insta::assert_snapshot!(
            render(&tree, root, None),
            @r#"<p>a &lt; b &amp; c &gt; d<a href="x&quot;y">&lt;go&gt;</a></p>"#
        );
    }

    #[test]
    fn void_elements_self_close() {
        let mut tree = Tree::new();
        let root = tree.root();
        tree.push(
            root,
            element_node(
                TokenKind::HtmlReady,
                Element::new("img").attr("src", "/a.png").attr("alt", "A"),
            ),
        );
        assert_eq!(render(&tree, root, None), r#"<img src="/a.png" alt="A"/>"#);
    }

    #[test]
    fn skipped_subtree_is_left_out() {
        let mut tree = Tree::new();
        let root = tree.root();
        let title = tree.push(
            root,
            element_node(TokenKind::HtmlReady, Element::new("h1").content("Title")),
        );
        tree.push(root, Node::text(TokenKind::HtmlReady, Span::default(), "body"));
        assert_eq!(render(&tree, root, Some(title)), "body");
        assert_eq!(render(&tree, title, None), "<h1>Title</h1>");
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let mut tree = Tree::new();
        let mut parent = tree.root();
        for _ in 0..10_000 {
            parent = tree.push(parent, element_node(TokenKind::HtmlContainer, Element::new("i")));
        }
        let html = render(&tree, tree.root(), None);
        assert!(html.starts_with("<i><i>"));
        assert_eq!(html.len(), 10_000 * "<i></i>".len());
    }
}
