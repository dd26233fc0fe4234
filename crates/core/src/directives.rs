//! Directive extraction.
//!
//! A directive is a line starting with `!`, e.g. `!title=My page` or
//! `!notesource Some citation`. The extractor lifts every directive line out of
//! the tree into a [`DirectiveTable`]; later passes take the names they
//! understand and whatever is left is reported as unknown.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::SpudTextError;
use crate::parse::Compilation;
use crate::token::TokenKind;

/// Base name of footnote definitions. `!noteX` defines note `X`.
pub const NOTE: &str = "note";

/// One directive line lifted out of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Directive name, `note` for footnote definitions.
    pub name: String,
    /// Footnote identifier for `note` directives, empty otherwise.
    pub subname: String,
    /// Trimmed argument text.
    pub argument: String,
    /// Grapheme offset of the `!`.
    pub offset: usize,
}

/// Parsed form of a directive marker such as `!title=Hello`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveOpening<'a> {
    /// Name up to the first `=`.
    pub name: &'a str,
    /// Footnote identifier when the name starts with `note`.
    pub subname: &'a str,
    /// Marker text after the name (starts with `=` when present).
    pub rest: &'a str,
}

/// Split a directive marker into its name and the remainder.
///
/// The marker must start with `!`; the lexer guarantees it contains no
/// whitespace.
///
/// ```
/// use spudtext_core::directives::parse_opening;
///
/// let opening = parse_opening("!notecite=Text").unwrap();
/// assert_eq!(opening.name, "note");
/// assert_eq!(opening.subname, "cite");
/// assert_eq!(opening.rest, "=Text");
/// ```
pub fn parse_opening(marker: &str) -> Option<DirectiveOpening<'_>> {
    let body = marker.strip_prefix('!')?;
    let end = body
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(body.len());
    let (full_name, rest) = body.split_at(end);
    let (name, subname) = match full_name.strip_prefix(NOTE) {
        Some(subname) => (NOTE, subname),
        None => (full_name, ""),
    };
    Some(DirectiveOpening {
        name,
        subname,
        rest,
    })
}

/// Normalize a directive argument: drop one leading `=` and surrounding whitespace.
pub fn clean_argument(raw: &str) -> &str {
    let raw = raw.trim_start();
    raw.strip_prefix('=').unwrap_or(raw).trim()
}

/// Directives grouped by name, in source order within each name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectiveTable {
    entries: BTreeMap<String, Vec<Directive>>,
}

impl DirectiveTable {
    /// Add a directive.
    pub fn insert(&mut self, directive: Directive) {
        self.entries
            .entry(directive.name.clone())
            .or_default()
            .push(directive);
    }

    /// Remove and return every directive called `name`.
    pub fn take(&mut self, name: &str) -> Vec<Directive> {
        self.entries.remove(name).unwrap_or_default()
    }

    /// Directives still in the table.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Directive])> {
        self.entries
            .iter()
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }

    /// Whether every directive has been taken.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of directives still in the table.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Lift every directive out of the tree.
pub(crate) fn extract(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let root = c.tree.root();
    for id in c.tree.child_ids(root) {
        let node = &c.tree[id];
        if node.kind != TokenKind::Directive {
            continue;
        }
        let Some(opener) = node.opener else {
            continue;
        };
        let marker = c.source.slice(opener);
        let Some(opening) = parse_opening(marker) else {
            continue;
        };
        let raw = format!("{}{}", opening.rest, c.tree.text_content(id));
        let directive = Directive {
            name: opening.name.to_string(),
            subname: opening.subname.to_string(),
            argument: clean_argument(&raw).to_string(),
            offset: opener.start,
        };
        c.logger.verbose(
            format!("Found directive '{}'", directive.name),
            Some(directive.offset),
        );
        c.directives.insert(directive);
        c.tree.remove(id);
    }
    Ok(())
}

/// Warn about every directive no pass consumed.
pub(crate) fn warn_residual(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    for (name, list) in c.directives.iter() {
        for directive in list {
            c.logger
                .warn(format!("Unknown directive '{name}'"), Some(directive.offset));
        }
    }
    Ok(())
}
