//! The compiled document.

use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::directives::DirectiveTable;
use crate::registry::Contributor;
use crate::render::render;
use crate::tree::{NodeId, Tree};

/// Contributor whose credit turns red under `!make_blue_red`.
const BLUE_CONTRIBUTOR: &str = "BlueStrategosJ";
const RED: &str = "f77";

/// Page-level switches set by flag directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageFlags {
    /// `!center_title`
    pub center_title: bool,
    /// `!nosearchindex`
    pub no_search_index: bool,
    /// `!noedit`
    pub no_edit: bool,
    /// `!make_blue_red`
    pub make_blue_red: bool,
}

/// Heading outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Heading level (2-6)
    pub depth: u8,
    /// Unique id of the rendered heading
    pub slug: String,
    /// Plain heading text
    pub text: String,
}

/// A successfully compiled document. Immutable and shareable across threads.
#[derive(Debug)]
pub struct SpudText {
    pub(crate) title: String,
    pub(crate) contributors: Vec<Contributor>,
    pub(crate) flags: PageFlags,
    pub(crate) commands: Vec<String>,
    pub(crate) headings: Vec<HeadingEntry>,
    pub(crate) unresolved: DirectiveTable,
    pub(crate) tree: Tree,
    pub(crate) title_node: NodeId,
    pub(crate) html: OnceCell<String>,
    pub(crate) elapsed: Duration,
}

impl SpudText {
    /// Page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Credited contributors in directive order.
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// Page flags.
    pub fn flags(&self) -> PageFlags {
        self.flags
    }

    /// Lower-cased search-bar command aliases.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Headings of the body in document order.
    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    /// Directives no pass understood. Each one was reported as a warning.
    pub fn unresolved_directives(&self) -> &DirectiveTable {
        &self.unresolved
    }

    /// The final render tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Time spent compiling.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Compile time in milliseconds, e.g. `1.234 ms`.
    pub fn elapsed_string(&self) -> String {
        format!("{:.3} ms", self.elapsed.as_secs_f64() * 1000.0)
    }

    /// Markup of the title heading.
    pub fn title_html(&self) -> String {
        render(&self.tree, self.title_node, None)
    }

    /// Markup of the body, without the title. Rendered once and cached.
    pub fn html(&self) -> &str {
        self.html
            .get_or_init(|| render(&self.tree, self.tree.root(), Some(self.title_node)))
    }

    /// Debug outline of the render tree.
    pub fn dump_tree(&self) -> String {
        self.tree.dump(self.tree.root())
    }

    /// Contributor credits joined as `a, b and c.`, empty without contributors.
    pub fn contributor_credits_html(&self) -> String {
        let credits: Vec<String> = self
            .contributors
            .iter()
            .map(|contributor| {
                let forced = (self.flags.make_blue_red
                    && contributor.username.eq_ignore_ascii_case(BLUE_CONTRIBUTOR))
                .then_some(RED);
                contributor.to_html(forced)
            })
            .collect();
        match credits.split_last() {
            None => String::new(),
            Some((last, [])) => format!("{last}."),
            Some((last, rest)) => format!("{} and {last}.", rest.join(", ")),
        }
    }
}
