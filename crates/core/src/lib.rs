#![deny(missing_docs)]
//! SpudText core: lexer, tree builder, semantic passes and HTML renderer.
//!
//! [`parse`] turns SpudText source into a [`SpudText`] document, consulting
//! the contributor and media [`Registries`] and reporting diagnostics through
//! the callbacks in [`ParseOptions`].

mod blocks;
mod builder;
/// Directive extraction and the directive table.
pub mod directives;
/// The compiled document.
pub mod document;
/// Core error and diagnostic types.
pub mod error;
/// Grapheme scanner.
pub mod lexer;
/// External links and embedded media.
pub mod links;
/// Diagnostic sinks.
pub mod logger;
mod lower;
mod meta;
/// Footnote resolution.
pub mod notes;
/// Parse options and the pipeline entry point.
pub mod parse;
/// Contributor and media lookup services.
pub mod registry;
/// HTML serialization.
pub mod render;
/// Slug generation utilities.
pub mod slug;
/// Grapheme-indexed source text.
pub mod source;
/// Token kind catalog.
pub mod token;
/// Arena-backed document tree.
pub mod tree;
mod validate;

pub use directives::{Directive, DirectiveTable};
pub use document::{HeadingEntry, PageFlags, SpudText};
pub use error::{Diagnostic, Severity, SourceLocation, SpudTextError};
pub use logger::{Callback, DiagnosticCallback, DiagnosticSink, LogSink, RecordingSink};
pub use parse::{ParseOptions, parse};
pub use registry::{
    Contributor, ContributorLookup, EmptyRegistry, MediaLink, MediaLookup, Registries,
};
pub use slug::{Slugger, slugify};
pub use source::{Source, Span};
pub use token::TokenKind;
pub use tree::{Element, Node, NodeId, Tree};
