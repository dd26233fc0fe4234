//! Turns the raw token stream into the initial tree.

use crate::SpudTextError;
use crate::lexer::RawToken;
use crate::logger::Logger;
use crate::source::Source;
use crate::token::TokenKind;
use crate::tree::{Node, NodeId, Tree};

/// Materialize raw tokens into unlinked nodes, coalescing adjacent text.
///
/// Backslashes that escaped nothing become literal text here.
pub(crate) fn finalize(source: &Source, tokens: &[RawToken]) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let kind = match token.kind {
            TokenKind::Backslash => TokenKind::Text,
            kind => kind,
        };
        let text = source.slice(token.span);
        if kind == TokenKind::Text
            && let Some(last) = nodes.last_mut()
            && last.kind == TokenKind::Text
        {
            last.text.push_str(text);
            last.span = last.span.cover(token.span);
            continue;
        }
        nodes.push(Node::text(kind, token.span, text));
    }
    nodes
}

/// Pair opening and closing markers into aggregates under a fresh root.
pub(crate) fn build(nodes: Vec<Node>, logger: &Logger<'_>) -> Result<Tree, SpudTextError> {
    let mut tree = Tree::new();
    let mut stack: Vec<NodeId> = vec![tree.root()];

    for node in nodes {
        let top = stack[stack.len() - 1];
        let top_closer = tree[top].kind.ended_by();

        if stack.len() > 1 && top_closer == Some(node.kind) {
            let aggregate = &mut tree[top];
            aggregate.closer = Some(node.span);
            aggregate.span = aggregate.span.cover(node.span);
            stack.pop();
        } else if let Some(kind) = node.kind.starts() {
            let mut aggregate = Node::new(kind, node.span);
            aggregate.opener = Some(node.span);
            let id = tree.push(top, aggregate);
            stack.push(id);
        } else {
            tree.push(top, node);
        }
    }

    if stack.len() > 1 {
        let aggregate = &tree[stack[stack.len() - 1]];
        let opener = aggregate.opener.unwrap_or(aggregate.span);
        let name = aggregate
            .kind
            .info()
            .started_by
            .map_or(aggregate.kind.name(), TokenKind::name);
        return Err(SpudTextError::UnclosedAggregate {
            name,
            location: logger.location(opener.start),
        });
    }

    logger.verbose(format!("Built tree with {} nodes", tree.len()), None);
    Ok(tree)
}
