//! Grapheme scanner producing the flat raw token stream.

use crate::source::{Source, Span};
use crate::token::TokenKind;

/// A token as emitted by the lexer: a kind and the graphemes it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    /// Kind of the token
    pub kind: TokenKind,
    /// Graphemes covered by the token
    pub span: Span,
}

/// Characters a backslash can escape.
const ESCAPABLE: &[&str] = &["!", "#", "*", "=", ">", "[", "]", "{", "}", "\\"];

struct Lexer<'a> {
    source: &'a Source,
    tokens: Vec<RawToken>,
}

impl<'a> Lexer<'a> {
    fn last(&self) -> Option<&RawToken> {
        self.tokens.last()
    }

    fn at_line_start(&self) -> bool {
        self.last().is_none_or(|token| token.kind == TokenKind::Newline)
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        self.tokens.push(RawToken {
            kind,
            span: Span::new(start, end),
        });
    }

    /// Append literal text, extending the previous text token when adjacent.
    fn push_text(&mut self, start: usize, end: usize) {
        if let Some(last) = self.tokens.last_mut()
            && last.kind == TokenKind::Text
            && last.span.end == start
        {
            last.span.end = end;
            return;
        }
        self.push(TokenKind::Text, start, end);
    }

    /// Length of the run of `grapheme` starting at `index`.
    fn run_length(&self, index: usize, grapheme: &str) -> usize {
        (index..self.source.len())
            .take_while(|&i| self.source.grapheme(i) == grapheme)
            .count()
    }

    fn escape_pending(&self, index: usize) -> bool {
        self.last()
            .is_some_and(|token| token.kind == TokenKind::Backslash && token.span.end == index)
    }

    /// Scan the grapheme at `index` and return the index of the next unscanned one.
    fn step(&mut self, index: usize) -> usize {
        let grapheme = self.source.grapheme(index);
        let next = index + 1;

        if grapheme.contains('\n') {
            self.push(TokenKind::Newline, index, next);
            return next;
        }
        if grapheme == "\r" {
            return next;
        }
        if self.escape_pending(index) && ESCAPABLE.contains(&grapheme) {
            self.tokens.pop();
            self.push_text(index, next);
            return next;
        }

        match grapheme {
            "\\" => {
                self.push(TokenKind::Backslash, index, next);
                next
            }
            "!" if self.at_line_start() => {
                let end = (index..self.source.len())
                    .find(|&i| starts_with_whitespace(self.source.grapheme(i)))
                    .unwrap_or(self.source.len());
                self.push(TokenKind::DirectiveStart, index, end);
                end
            }
            ">" if self.at_line_start() => {
                self.push(TokenKind::Blockquote, index, next);
                next
            }
            "#" => {
                let run = self.run_length(index, "#");
                if run == 2 {
                    self.push(TokenKind::Strikethrough, index, index + run);
                } else {
                    self.push_text(index, index + run);
                }
                index + run
            }
            "*" => {
                let run = self.run_length(index, "*").min(3);
                let kind = match run {
                    1 => TokenKind::Em,
                    2 => TokenKind::Bold,
                    _ => TokenKind::EmBold,
                };
                self.push(kind, index, index + run);
                index + run
            }
            "=" => {
                let run = self.run_length(index, "=");
                match TokenKind::heading_marker(run) {
                    Some(kind) => self.push(kind, index, index + run),
                    None => self.push_text(index, index + run),
                }
                index + run
            }
            "[" | "]" => {
                let run = self.run_length(index, grapheme).min(3);
                let opening = grapheme == "[";
                let kind = match (run, opening) {
                    (2, true) => Some(TokenKind::ExternalLinkStart),
                    (2, false) => Some(TokenKind::ExternalLinkEnd),
                    (3, true) => Some(TokenKind::EmbeddedFileStart),
                    (3, false) => Some(TokenKind::EmbeddedFileEnd),
                    _ => None,
                };
                match kind {
                    Some(kind) => self.push(kind, index, index + run),
                    None => self.push_text(index, index + run),
                }
                index + run
            }
            "{" => {
                self.push(TokenKind::NoteRefStart, index, next);
                next
            }
            "}" => {
                self.push(TokenKind::NoteRefEnd, index, next);
                next
            }
            _ => {
                self.push_text(index, next);
                next
            }
        }
    }
}

fn starts_with_whitespace(grapheme: &str) -> bool {
    grapheme.chars().next().is_some_and(char::is_whitespace)
}

/// Scan `source` into raw tokens.
///
/// Never fails. The stream always ends with a newline token covering the
/// synthetic trailing newline. Backslashes that escaped nothing are left in
/// the stream as [`TokenKind::Backslash`] and become text when finalized.
pub fn tokenize(source: &Source) -> Vec<RawToken> {
    let mut lexer = Lexer {
        source,
        tokens: Vec::with_capacity(source.len() / 4 + 1),
    };
    let mut index = 0;
    while index < source.len() {
        index = lexer.step(index);
    }
    lexer.push(TokenKind::Newline, source.len(), source.len() + 1);
    lexer.tokens
}
