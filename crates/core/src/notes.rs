//! Footnotes: `{name}` references and `!notename` definitions.

use std::collections::HashMap;

use crate::SpudTextError;
use crate::directives::{Directive, NOTE};
use crate::parse::Compilation;
use crate::slug::Slugger;
use crate::source::Span;
use crate::token::TokenKind;
use crate::tree::{Element, Node, NodeId, Tree};
use crate::validate::remove_and_prune;

/// Backlink label for the `index`-th reference: `a`..`z`, then `aa`, `ab`, ...
///
/// ```
/// use spudtext_core::notes::backlink_letters;
///
/// assert_eq!(backlink_letters(0), "a");
/// assert_eq!(backlink_letters(25), "z");
/// assert_eq!(backlink_letters(26), "aa");
/// assert_eq!(backlink_letters(701), "zz");
/// assert_eq!(backlink_letters(702), "aaa");
/// ```
pub fn backlink_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

struct Note {
    name: String,
    /// Fragment-safe form of `name` used in generated ids.
    anchor: String,
    refs: Vec<NodeId>,
    definition: Option<Directive>,
}

/// Resolve note references against definitions and append the notes section.
pub(crate) fn resolve_notes(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let root = c.tree.root();
    let mut notes: Vec<Note> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for id in c.tree.descendants(root) {
        if c.tree[id].kind != TokenKind::NoteRef {
            continue;
        }
        let name = c.tree.text_content(id).trim().to_string();
        let index = *by_name.entry(name.clone()).or_insert_with(|| {
            notes.push(Note {
                name,
                anchor: String::new(),
                refs: Vec::new(),
                definition: None,
            });
            notes.len() - 1
        });
        notes[index].refs.push(id);
    }

    for definition in c.directives.take(NOTE) {
        let Some(&index) = by_name.get(&definition.subname) else {
            c.logger.warn(
                format!(
                    "Note '{}' is defined but never referenced",
                    definition.subname
                ),
                Some(definition.offset),
            );
            continue;
        };
        let note = &mut notes[index];
        if note.definition.is_some() {
            c.logger.warn(
                format!(
                    "Duplicate definition of note '{}', keeping the first one",
                    note.name
                ),
                Some(definition.offset),
            );
            continue;
        }
        note.definition = Some(definition);
    }

    let mut resolved = Vec::new();
    for note in notes {
        if note.definition.is_some() {
            resolved.push(note);
            continue;
        }
        let offset = note.refs.first().map(|&id| c.tree[id].offset());
        c.logger.warn(
            format!("Note '{}' is referenced but never defined", note.name),
            offset,
        );
        for id in note.refs {
            remove_and_prune(&mut c.tree, c.logger, id);
        }
    }

    if resolved.is_empty() {
        return Ok(());
    }
    let mut anchors = Slugger::new();
    for note in &mut resolved {
        note.anchor = anchors.next_slug(&note.name);
        for (index, &id) in note.refs.iter().enumerate() {
            rewrite_reference(&mut c.tree, id, note, index);
        }
    }
    append_section(&mut c.tree, &resolved);
    c.logger
        .verbose(format!("Resolved {} notes", resolved.len()), None);
    Ok(())
}

fn rewrite_reference(tree: &mut Tree, id: NodeId, note: &Note, index: usize) {
    let anchor = &note.anchor;
    tree.clear_children(id);
    let node = &mut tree[id];
    node.kind = TokenKind::HtmlContainer;
    node.element = Some(
        Element::new("sup")
            .attr("id", format!("ref-{anchor}-{}", backlink_letters(index)))
            .attr("class", "article-ref"),
    );
    let link = Element::new("a")
        .attr("href", format!("#bottom-ref-{anchor}"))
        .content(format!("[{}]", note.name));
    tree.push(id, element_leaf(link));
}

fn element_leaf(element: Element) -> Node {
    let mut node = Node::new(TokenKind::HtmlReady, Span::default());
    node.element = Some(element);
    node
}

fn container(element: Element) -> Node {
    let mut node = Node::new(TokenKind::HtmlContainer, Span::default());
    node.element = Some(element);
    node
}

fn text_leaf(text: impl Into<String>) -> Node {
    Node::text(TokenKind::HtmlReady, Span::default(), text)
}

/// Append the `Notes` heading and the list of definitions.
fn append_section(tree: &mut Tree, notes: &[Note]) {
    let root = tree.root();
    let heading = tree.push(root, Node::new(TokenKind::Heading2, Span::default()));
    tree.push(heading, Node::text(TokenKind::Text, Span::default(), "Notes"));

    let list = tree.push(root, container(Element::new("div").attr("id", "bottom-refs")));
    for note in notes {
        let anchor = &note.anchor;
        let entry = tree.push(
            list,
            container(
                Element::new("div")
                    .attr("class", "bottom-ref")
                    .attr("id", format!("bottom-ref-{anchor}")),
            ),
        );
        tree.push(
            entry,
            element_leaf(Element::new("div").content(format!("{}:", note.name))),
        );
        let body = tree.push(entry, container(Element::new("div")));

        let single = note.refs.len() == 1;
        for index in 0..note.refs.len() {
            let letter = backlink_letters(index);
            let label = if single { "^".to_string() } else { letter.clone() };
            let backlink = Element::new("a")
                .attr("href", format!("#ref-{anchor}-{letter}"))
                .content(label);
            tree.push(body, element_leaf(backlink));
            tree.push(body, text_leaf(" "));
        }
        let text = note
            .definition
            .as_ref()
            .map(|definition| definition.argument.clone())
            .unwrap_or_default();
        tree.push(body, text_leaf(text));
    }
}
