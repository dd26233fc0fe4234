//! Root-level block structure: blockquotes, blank lines and paragraphs.

use crate::SpudTextError;
use crate::parse::Compilation;
use crate::token::TokenKind;
use crate::tree::{Node, NodeId, Tree};

/// Merge consecutive quoted lines into one blockquote holding a paragraph per line.
pub(crate) fn merge_blockquotes(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let tree = &mut c.tree;
    let root = tree.root();
    let mut container: Option<NodeId> = None;

    for id in tree.child_ids(root) {
        if tree[id].kind != TokenKind::BlockquoteAggregate {
            container = None;
            continue;
        }
        let line = tree.alloc(Node::new(TokenKind::Paragraph, tree[id].span));
        tree.move_children(id, line);
        tree.trim_edges(line);

        let target = match container {
            Some(target) => {
                let span = tree[id].span;
                tree[target].span = tree[target].span.cover(span);
                tree.remove(id);
                target
            }
            None => {
                container = Some(id);
                id
            }
        };
        if tree[line].is_leaf() {
            tree.remove(line);
        } else {
            tree.append_child(target, line);
        }
    }

    for id in tree.child_ids(root) {
        if tree[id].kind == TokenKind::BlockquoteAggregate && tree[id].is_leaf() {
            tree.remove(id);
        }
    }
    Ok(())
}

/// Strip blank lines at the start and end of the document.
pub(crate) fn trim_blank_lines(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let tree = &mut c.tree;
    let root = tree.root();
    while let Some(first) = tree[root].first_child()
        && tree[first].kind == TokenKind::Newline
    {
        tree.remove(first);
    }
    while let Some(last) = tree[root].last_child()
        && tree[last].kind == TokenKind::Newline
    {
        tree.remove(last);
    }
    Ok(())
}

/// Group the inline content between root-level newlines into paragraphs.
///
/// Block nodes end the current run and stay at the root unwrapped.
pub(crate) fn group_paragraphs(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let tree = &mut c.tree;
    let root = tree.root();
    let mut run: Vec<NodeId> = Vec::new();

    for id in tree.child_ids(root) {
        let kind = tree[id].kind;
        if kind == TokenKind::Newline {
            flush(tree, &mut run);
            tree.remove(id);
        } else if kind.is_block() {
            flush(tree, &mut run);
        } else {
            run.push(id);
        }
    }
    flush(tree, &mut run);
    Ok(())
}

fn flush(tree: &mut Tree, run: &mut Vec<NodeId>) {
    if run.is_empty() {
        return;
    }
    let blank = run.iter().all(|&id| {
        let node = &tree[id];
        node.kind == TokenKind::Text && node.text.trim().is_empty()
    });
    if blank {
        for id in run.drain(..) {
            tree.remove(id);
        }
        return;
    }

    let span = run
        .iter()
        .map(|&id| tree[id].span)
        .reduce(|a, b| a.cover(b))
        .unwrap_or_default();
    let paragraph = tree.alloc(Node::new(TokenKind::Paragraph, span));
    tree.insert_before(run[0], paragraph);
    for id in run.drain(..) {
        tree.detach(id);
        tree.append_child(paragraph, id);
    }
    tree.trim_edges(paragraph);
}

#[cfg(test)]
mod tests {
    use crate::parse::tests::compile_until;
    use crate::token::TokenKind;

    fn root_kinds(input: &str, until: &str) -> Vec<TokenKind> {
        let run = compile_until(input, until).expect("valid");
        run.tree
            .child_ids(run.tree.root())
            .into_iter()
            .map(|id| run.tree[id].kind)
            .collect()
    }

    #[test]
    fn consecutive_quotes_merge() {
        let run = compile_until("> first\n>second\n\n> third", "blockquotes").expect("valid");
        let tree = &run.tree;
        let quotes: Vec<_> = tree
            .child_ids(tree.root())
            .into_iter()
            .filter(|&id| tree[id].kind == TokenKind::BlockquoteAggregate)
            .collect();
        assert_eq!(quotes.len(), 2);
        let lines: Vec<_> = tree
            .child_ids(quotes[0])
            .into_iter()
            .map(|id| tree.text_content(id))
            .collect();
        assert_eq!(lines, vec!["first", "second"]);
        assert_eq!(tree.text_content(quotes[1]), "third");
    }

    #[test]
    fn blank_lines_are_trimmed_at_the_edges() {
        assert_eq!(
            root_kinds("\n\nabc\n\n", "trim"),
            vec![TokenKind::Text]
        );
    }

    #[test]
    fn newlines_delimit_paragraphs() {
        let run = compile_until("one *two*\n\n   \nthree", "paragraphs").expect("valid");
        let tree = &run.tree;
        let paragraphs = tree.child_ids(tree.root());
        assert_eq!(paragraphs.len(), 2);
        assert!(paragraphs.iter().all(|&id| tree[id].kind == TokenKind::Paragraph));
        assert_eq!(tree.text_content(paragraphs[0]), "one two");
        assert_eq!(tree.text_content(paragraphs[1]), "three");
    }

    #[test]
    fn blocks_are_not_wrapped() {
        assert_eq!(
            root_kinds("intro ==Heading== outro\n> quote", "paragraphs"),
            vec![
                TokenKind::Paragraph,
                TokenKind::Heading2,
                TokenKind::Paragraph,
                TokenKind::BlockquoteAggregate
            ]
        );
    }
}
