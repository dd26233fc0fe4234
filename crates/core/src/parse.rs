//! Parse options and the compilation pipeline.

use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;

use crate::directives::DirectiveTable;
use crate::document::{HeadingEntry, PageFlags, SpudText};
use crate::lexer::tokenize;
use crate::logger::{Callback, DiagnosticCallback, DiagnosticSink, LogSink, Logger};
use crate::registry::{Contributor, Registries};
use crate::source::Source;
use crate::tree::{NodeId, Tree};
use crate::{Diagnostic, SpudTextError};
use crate::{blocks, builder, directives, links, lower, meta, notes, validate};

/// Options for one parse: where diagnostics go and which file they refer to.
#[derive(Clone)]
pub struct ParseOptions {
    /// Path reported in diagnostic locations.
    pub filepath: Option<String>,
    /// Receivers of informational messages.
    pub verbose_callbacks: Vec<Callback>,
    /// Receivers of warnings.
    pub warn_callbacks: Vec<Callback>,
    /// Receivers of the fatal error, if any.
    pub error_callbacks: Vec<Callback>,
}

impl ParseOptions {
    /// Options with no callbacks at all.
    pub fn silent() -> Self {
        Self {
            filepath: None,
            verbose_callbacks: Vec::new(),
            warn_callbacks: Vec::new(),
            error_callbacks: Vec::new(),
        }
    }

    /// Set the file path reported in diagnostics.
    pub fn with_filepath(mut self, filepath: impl Into<String>) -> Self {
        self.filepath = Some(filepath.into());
        self
    }

    /// Route all three severities to `sink`.
    pub fn with_sink<S: DiagnosticSink + 'static>(mut self, sink: Arc<S>) -> Self {
        let verbose = sink.clone();
        self.verbose_callbacks
            .push(Arc::new(move |d: &Diagnostic| verbose.verbose(d)));
        let warn = sink.clone();
        self.warn_callbacks
            .push(Arc::new(move |d: &Diagnostic| warn.warn(d)));
        self.error_callbacks
            .push(Arc::new(move |d: &Diagnostic| sink.error(d)));
        self
    }

    /// Add a verbose callback.
    pub fn on_verbose(mut self, callback: impl DiagnosticCallback + 'static) -> Self {
        self.verbose_callbacks.push(Arc::new(callback));
        self
    }

    /// Add a warning callback.
    pub fn on_warn(mut self, callback: impl DiagnosticCallback + 'static) -> Self {
        self.warn_callbacks.push(Arc::new(callback));
        self
    }

    /// Add an error callback.
    pub fn on_error(mut self, callback: impl DiagnosticCallback + 'static) -> Self {
        self.error_callbacks.push(Arc::new(callback));
        self
    }
}

impl Default for ParseOptions {
    /// Forward everything to the `log` facade.
    fn default() -> Self {
        Self::silent().with_sink(Arc::new(LogSink))
    }
}

impl std::fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("filepath", &self.filepath)
            .field("verbose_callbacks", &self.verbose_callbacks.len())
            .field("warn_callbacks", &self.warn_callbacks.len())
            .field("error_callbacks", &self.error_callbacks.len())
            .finish()
    }
}

/// State threaded through the passes of one parse.
pub(crate) struct Compilation<'a> {
    pub(crate) source: &'a Source,
    pub(crate) logger: &'a Logger<'a>,
    pub(crate) registries: &'a Registries<'a>,
    pub(crate) tree: Tree,
    pub(crate) directives: DirectiveTable,
    pub(crate) title: Option<String>,
    pub(crate) title_node: Option<NodeId>,
    pub(crate) contributors: Vec<Contributor>,
    pub(crate) flags: PageFlags,
    pub(crate) commands: Vec<String>,
    pub(crate) headings: Vec<HeadingEntry>,
}

type Pass = fn(&mut Compilation<'_>) -> Result<(), SpudTextError>;

/// Semantic passes in execution order.
pub(crate) const PASSES: &[(&str, Pass)] = &[
    ("validate", validate::check_structure),
    ("prune", validate::prune_empty),
    ("directives", directives::extract),
    ("blockquotes", blocks::merge_blockquotes),
    ("trim", blocks::trim_blank_lines),
    ("paragraphs", blocks::group_paragraphs),
    ("flags", meta::resolve_flags),
    ("commands", meta::resolve_commands),
    ("title", meta::resolve_title),
    ("contributors", meta::resolve_contributors),
    ("notes", notes::resolve_notes),
    ("external_links", links::resolve_external_links),
    ("embedded_files", links::resolve_embedded_files),
    ("lowering", lower::lower),
    ("residual_directives", directives::warn_residual),
];

impl<'a> Compilation<'a> {
    fn new(
        source: &'a Source,
        logger: &'a Logger<'a>,
        registries: &'a Registries<'a>,
    ) -> Result<Self, SpudTextError> {
        let nodes = builder::finalize(source, &tokenize(source));
        let tree = builder::build(nodes, logger)?;
        Ok(Self {
            source,
            logger,
            registries,
            tree,
            directives: DirectiveTable::default(),
            title: None,
            title_node: None,
            contributors: Vec::new(),
            flags: PageFlags::default(),
            commands: Vec::new(),
            headings: Vec::new(),
        })
    }

    /// Run passes in order, stopping after `last` when given.
    fn run(&mut self, last: Option<&str>) -> Result<(), SpudTextError> {
        for (name, pass) in PASSES {
            let started = Instant::now();
            pass(self)?;
            log::trace!("pass '{}' took {:?}", name, started.elapsed());
            if last == Some(*name) {
                break;
            }
        }
        Ok(())
    }

    fn finish(self, started: Instant) -> Result<SpudText, SpudTextError> {
        let title = self.title.ok_or(SpudTextError::MissingTitle)?;
        let title_node = self.title_node.ok_or(SpudTextError::MissingTitle)?;
        Ok(SpudText {
            title,
            contributors: self.contributors,
            flags: self.flags,
            commands: self.commands,
            headings: self.headings,
            unresolved: self.directives,
            tree: self.tree,
            title_node,
            html: OnceCell::new(),
            elapsed: started.elapsed(),
        })
    }
}

/// Compile `input` into a document.
///
/// Warnings go to the warning callbacks and never stop the parse. A fatal
/// error is reported once through the error callbacks and returned.
///
/// ```
/// use spudtext_core::{ParseOptions, Registries, parse};
///
/// let doc = parse("!title Hello\n\nWorld", &Registries::empty(), &ParseOptions::silent()).unwrap();
/// assert_eq!(doc.title(), "Hello");
/// assert_eq!(doc.html(), "<p>World</p>");
/// ```
pub fn parse(
    input: &str,
    registries: &Registries<'_>,
    options: &ParseOptions,
) -> Result<SpudText, SpudTextError> {
    let started = Instant::now();
    let source = Source::new(input);
    let logger = Logger::new(options, &source);

    let result = if input.is_empty() {
        Err(SpudTextError::EmptyInput)
    } else {
        Compilation::new(&source, &logger, registries).and_then(|mut compilation| {
            compilation.run(None)?;
            compilation.finish(started)
        })
    };

    match result {
        Ok(document) => {
            logger.verbose(
                format!(
                    "Parsed '{}' in {}",
                    document.title(),
                    document.elapsed_string()
                ),
                None,
            );
            Ok(document)
        }
        Err(error) => {
            logger.report(&error);
            Err(error)
        }
    }
}
