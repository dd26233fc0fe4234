//! Grapheme-segmented view over the source text.

use unicode_segmentation::UnicodeSegmentation;

use crate::SourceLocation;

/// Half-open range of grapheme indices into a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First grapheme covered
    pub start: usize,
    /// One past the last grapheme covered
    pub end: usize,
}

impl Span {
    /// Create a span from `start` to `end`.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of graphemes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Source text split into user-perceived characters.
///
/// A synthetic trailing newline is stored after the last real grapheme so a
/// directive on the final line still terminates; it lives at index [`len`].
///
/// [`len`]: Source::len
pub struct Source {
    text: String,
    /// Byte offset where each grapheme starts, plus the final text length.
    bounds: Vec<usize>,
    /// Grapheme index at which each line starts.
    line_starts: Vec<usize>,
}

impl Source {
    /// Segment `input` into grapheme clusters.
    pub fn new(input: &str) -> Self {
        let mut bounds: Vec<usize> = input.grapheme_indices(true).map(|(i, _)| i).collect();
        let mut text = String::with_capacity(input.len() + 1);
        text.push_str(input);
        // Pushed separately so a trailing '\r' never fuses with it into "\r\n".
        bounds.push(text.len());
        text.push('\n');
        bounds.push(text.len());

        let mut line_starts = vec![0];
        for index in 0..bounds.len() - 1 {
            if text[bounds[index]..bounds[index + 1]].contains('\n') {
                line_starts.push(index + 1);
            }
        }

        Self {
            text,
            bounds,
            line_starts,
        }
    }

    /// Number of real graphemes (the synthetic newline is not counted).
    pub fn len(&self) -> usize {
        self.bounds.len() - 2
    }

    /// Whether the source has no real graphemes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grapheme at `index`; index [`Source::len`] is the synthetic newline.
    pub fn grapheme(&self, index: usize) -> &str {
        &self.text[self.bounds[index]..self.bounds[index + 1]]
    }

    /// Text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        &self.text[self.bounds[span.start]..self.bounds[span.end]]
    }

    /// Line and column (1-indexed) of the grapheme at `offset`.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }

    /// Build a [`SourceLocation`] for `offset`.
    pub fn location(&self, offset: usize, file: Option<&str>) -> SourceLocation {
        let (line, column) = self.line_column(offset);
        match file {
            Some(file) => SourceLocation::with_file(file.to_string(), offset, line, column),
            None => SourceLocation::new(offset, line, column),
        }
    }
}
