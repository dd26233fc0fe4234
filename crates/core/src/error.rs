use thiserror::Error;

/// Source location information for diagnostics.
///
/// `offset` is the index of the grapheme cluster the diagnostic points at;
/// `line` and `column` are derived from it (both 1-indexed, columns count
/// grapheme clusters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Grapheme offset into the source
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            file: None,
            offset,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, offset: usize, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            offset,
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Fatal errors that abort a parse. No document is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpudTextError {
    /// The source text was empty.
    #[error("Source text is empty")]
    EmptyInput,
    /// An aggregate was opened and never closed.
    #[error("One aggregate was left unclosed: '{name}' starting at index {}, {location}", location.offset)]
    UnclosedAggregate {
        /// Kind name of the opening marker
        name: &'static str,
        /// Location of the opening marker
        location: SourceLocation,
    },
    /// A node that must sit directly under the root was nested.
    #[error("'{name}' must be a child of the document root, {location}")]
    MisplacedNode {
        /// Kind name of the offending node
        name: &'static str,
        /// Location of the offending node
        location: SourceLocation,
    },
    /// A node whose children must be leaves received a nested aggregate.
    #[error("'{name}' cannot contain '{child}', {location}")]
    NestedAggregate {
        /// Kind name of the parent node
        name: &'static str,
        /// Kind name of the nested aggregate
        child: &'static str,
        /// Location of the nested aggregate
        location: SourceLocation,
    },
    /// A node that accepts a single text child had something else.
    #[error("'{name}' must contain exactly one text child, {location}")]
    InvalidChildren {
        /// Kind name of the offending node
        name: &'static str,
        /// Location of the offending node
        location: SourceLocation,
    },
    /// No `!title` directive was found.
    #[error("Missing required 'title' directive")]
    MissingTitle,
}

impl SpudTextError {
    /// Location of the construct that caused the error, if it has one.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            SpudTextError::UnclosedAggregate { location, .. }
            | SpudTextError::MisplacedNode { location, .. }
            | SpudTextError::NestedAggregate { location, .. }
            | SpudTextError::InvalidChildren { location, .. } => Some(location),
            SpudTextError::EmptyInput | SpudTextError::MissingTitle => None,
        }
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, never affects output
    Verbose,
    /// Recoverable problem; the construct was dropped or defaulted
    Warning,
    /// Fatal problem; the parse failed
    Error,
}

impl Severity {
    /// Label used when formatting a diagnostic.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Verbose => "Verbose",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// One message emitted during a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the message
    pub severity: Severity,
    /// Human readable message
    pub message: String,
    /// Where in the source the message originates, when known
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    /// Create a diagnostic pointing at a location.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            location,
        }
    }

    /// Build the error-severity diagnostic describing a fatal error.
    pub fn from_error(error: &SpudTextError) -> Self {
        Self::new(Severity::Error, error.to_string(), error.location().cloned())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(
                f,
                "{}: {} ({})",
                self.severity.label(),
                self.message,
                location
            ),
            None => write!(f, "{}: {}", self.severity.label(), self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_with_and_without_file() {
        let loc = SourceLocation::new(4, 2, 3);
        assert_eq!(loc.to_string(), "2:3");
        let loc = SourceLocation::with_file("docs/main.txt".to_string(), 4, 2, 3);
        assert_eq!(loc.to_string(), "docs/main.txt:2:3");
    }

    #[test]
    fn unclosed_error_mentions_offset() {
        let err = SpudTextError::UnclosedAggregate {
            name: "em",
            location: SourceLocation::new(7, 1, 8),
        };
        let message = err.to_string();
        assert!(message.contains("'em'"));
        assert!(message.contains("index 7"));
        assert_eq!(err.location().map(|l| l.offset), Some(7));
    }

    #[test]
    fn diagnostic_from_error_is_error_severity() {
        let diagnostic = Diagnostic::from_error(&SpudTextError::MissingTitle);
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.location.is_none());
        assert_eq!(
            diagnostic.to_string(),
            "Error: Missing required 'title' directive"
        );
    }
}
