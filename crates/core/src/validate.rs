//! Structural checks on the freshly built tree.

use crate::SpudTextError;
use crate::logger::Logger;
use crate::parse::Compilation;
use crate::token::TokenKind;
use crate::tree::{NodeId, Tree};

/// Enforce the placement and arity rules of every kind.
pub(crate) fn check_structure(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let tree = &c.tree;
    let root = tree.root();

    for id in tree.descendants(root).into_iter().skip(1) {
        let node = &tree[id];
        let info = node.kind.info();
        let location = || c.logger.location(node.offset());

        if info.only_one_text_child_allowed && !node.is_leaf() {
            let children = tree.child_ids(id);
            if children.len() != 1 || tree[children[0]].kind != TokenKind::Text {
                return Err(SpudTextError::InvalidChildren {
                    name: info.name,
                    location: location(),
                });
            }
        }

        if info.must_be_child_of_root && node.parent() != Some(root) {
            return Err(SpudTextError::MisplacedNode {
                name: info.name,
                location: location(),
            });
        }

        if info.children_cant_have_children
            && let Some(child) = tree
                .child_ids(id)
                .into_iter()
                .find(|&child| tree[child].kind.info().can_have_children)
        {
            return Err(SpudTextError::NestedAggregate {
                name: info.name,
                child: tree[child].kind.name(),
                location: c.logger.location(tree[child].offset()),
            });
        }
    }
    Ok(())
}

/// Remove aggregates that must have content but were left empty.
pub(crate) fn prune_empty(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let root = c.tree.root();
    for id in c.tree.descendants(root).into_iter().rev() {
        let node = &c.tree[id];
        if node.kind.info().needs_children && node.is_leaf() {
            warn_removed(c.logger, &c.tree, id);
            c.tree.remove(id);
        }
    }
    Ok(())
}

/// Remove `id`, then every ancestor its removal left without content.
///
/// Paragraphs are trimmed before the check and dropped silently; aggregates
/// that need children are dropped with the same warning as [`prune_empty`].
pub(crate) fn remove_and_prune(tree: &mut Tree, logger: &Logger<'_>, id: NodeId) {
    let root = tree.root();
    let mut current = tree[id].parent();
    tree.remove(id);
    while let Some(id) = current
        && id != root
    {
        let kind = tree[id].kind;
        let needs_children = kind.info().needs_children;
        if kind == TokenKind::Paragraph {
            tree.trim_edges(id);
        } else if !needs_children {
            break;
        }
        if !tree[id].is_leaf() {
            break;
        }
        if needs_children {
            warn_removed(logger, tree, id);
        }
        current = tree[id].parent();
        tree.remove(id);
    }
}

pub(crate) fn warn_removed(logger: &Logger<'_>, tree: &Tree, id: NodeId) {
    let node = &tree[id];
    logger.warn(
        format!("Removed empty '{}'", node.kind.name()),
        Some(node.offset()),
    );
}

#[cfg(test)]
mod tests {
    use crate::parse::tests::compile_until;
    use crate::{Severity, SpudTextError};

    #[test]
    fn links_cannot_nest_aggregates() {
        let err = compile_until("[[https://example.com *b*]]", "validate").unwrap_err();
        assert!(matches!(
            err.error,
            SpudTextError::NestedAggregate {
                name: "external_link",
                child: "em_aggregate",
                ..
            }
        ));
        assert_eq!(err.error.location().map(|l| l.offset), Some(22));
    }

    #[test]
    fn note_reference_needs_plain_text() {
        let err = compile_until("{*b*}", "validate").unwrap_err();
        assert!(matches!(
            err.error,
            SpudTextError::InvalidChildren {
                name: "note_ref",
                ..
            }
        ));
    }

    #[test]
    fn directive_inside_aggregate_is_misplaced() {
        let err = compile_until("*a\n!title x\n*", "validate").unwrap_err();
        match err.error {
            SpudTextError::MisplacedNode { name, location } => {
                assert_eq!(name, "directive");
                assert_eq!(location.line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn note_reference_with_marker_leaf_is_invalid() {
        let err = compile_until("{a ]] b}", "validate").unwrap_err();
        assert!(matches!(
            err.error,
            SpudTextError::InvalidChildren { name: "note_ref", .. }
        ));
    }

    #[test]
    fn empty_aggregates_are_pruned_with_a_warning() {
        let run = compile_until("a {} b [[]] c", "prune").expect("valid");
        assert_eq!(run.tree.text_content(run.tree.root()), "a  b  c\n");
        let warnings: Vec<_> = run
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            warnings,
            vec!["Removed empty 'external_link'", "Removed empty 'note_ref'"]
        );
    }

    #[test]
    fn pruning_cascades_to_parents() {
        let run = compile_until("x *{}* y", "prune").expect("valid");
        assert_eq!(run.tree.text_content(run.tree.root()), "x  y\n");
        assert_eq!(run.tree.child_ids(run.tree.root()).len(), 3);
        assert_eq!(
            run.diagnostics
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
            2
        );
    }
}
