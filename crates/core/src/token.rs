//! Static catalog of token kinds.
//!
//! Every kind has one [`KindInfo`] entry in [`KINDS`], indexed by the enum
//! discriminant. Aggregate kinds name the raw kinds that open and close them;
//! the reverse relation ("which aggregate does this raw kind open") is derived
//! once on first use.

use once_cell::sync::Lazy;

/// Every kind of node that can appear in the token stream or the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// Synthetic document root.
    Root,
    /// Line break; closes directives and blockquote lines.
    Newline,
    /// Literal text run.
    Text,
    /// Pending escape.
    Backslash,
    /// `*`
    Em,
    /// Emphasised span.
    EmAggregate,
    /// `**`
    Bold,
    /// Bold span.
    BoldAggregate,
    /// `***`
    EmBold,
    /// Bold and emphasised span.
    EmBoldAggregate,
    /// `##`
    Strikethrough,
    /// Struck-through span.
    StrikethroughAggregate,
    /// `==`
    Heading2Marker,
    /// `===`
    Heading3Marker,
    /// `====`
    Heading4Marker,
    /// `=====`
    Heading5Marker,
    /// `======`
    Heading6Marker,
    /// Level 2 heading.
    Heading2,
    /// Level 3 heading.
    Heading3,
    /// Level 4 heading.
    Heading4,
    /// Level 5 heading.
    Heading5,
    /// Level 6 heading.
    Heading6,
    /// `>` at the start of a line.
    Blockquote,
    /// One quoted line, or a merged run of them.
    BlockquoteAggregate,
    /// `!name` at the start of a line.
    DirectiveStart,
    /// Directive line.
    Directive,
    /// `[[`
    ExternalLinkStart,
    /// `]]`
    ExternalLinkEnd,
    /// External link.
    ExternalLink,
    /// `[[[`
    EmbeddedFileStart,
    /// `]]]`
    EmbeddedFileEnd,
    /// Embedded media reference.
    EmbeddedFile,
    /// `{`
    NoteRefStart,
    /// `}`
    NoteRefEnd,
    /// Footnote reference.
    NoteRef,
    /// Line or run grouping produced by the block passes.
    Paragraph,
    /// Render-ready leaf: a literal text run or a self-contained element.
    HtmlReady,
    /// Render-ready element wrapping child nodes.
    HtmlContainer,
}

/// Static metadata for one [`TokenKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    /// Kind this entry describes.
    pub kind: TokenKind,
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Fixed length in graphemes, for markers that have one.
    pub raw_len: Option<usize>,
    /// Whether nodes of this kind own children.
    pub can_have_children: bool,
    /// Produced by a pass; never emitted by the lexer.
    pub is_processed: bool,
    /// Raw kind that opens this aggregate.
    pub started_by: Option<TokenKind>,
    /// Raw kind that closes this aggregate.
    pub ended_by: Option<TokenKind>,
    /// May only sit directly under the root.
    pub must_be_child_of_root: bool,
    /// Children must be leaves.
    pub children_cant_have_children: bool,
    /// Must hold a single text leaf.
    pub only_one_text_child_allowed: bool,
    /// Removed with a warning when left empty.
    pub needs_children: bool,
}

impl KindInfo {
    const fn raw(kind: TokenKind, name: &'static str, raw_len: Option<usize>) -> Self {
        Self {
            kind,
            name,
            raw_len,
            can_have_children: false,
            is_processed: false,
            started_by: None,
            ended_by: None,
            must_be_child_of_root: false,
            children_cant_have_children: false,
            only_one_text_child_allowed: false,
            needs_children: false,
        }
    }

    const fn aggregate(
        kind: TokenKind,
        name: &'static str,
        started_by: TokenKind,
        ended_by: TokenKind,
    ) -> Self {
        Self {
            can_have_children: true,
            is_processed: true,
            started_by: Some(started_by),
            ended_by: Some(ended_by),
            ..Self::raw(kind, name, None)
        }
    }

    const fn processed(kind: TokenKind, name: &'static str, can_have_children: bool) -> Self {
        Self {
            can_have_children,
            is_processed: true,
            ..Self::raw(kind, name, None)
        }
    }

    const fn root_only(self) -> Self {
        Self {
            must_be_child_of_root: true,
            ..self
        }
    }

    const fn flat(self) -> Self {
        Self {
            children_cant_have_children: true,
            ..self
        }
    }

    const fn single_text(self) -> Self {
        Self {
            only_one_text_child_allowed: true,
            ..self
        }
    }

    const fn needs_children(self) -> Self {
        Self {
            needs_children: true,
            ..self
        }
    }
}

use TokenKind as K;

/// Number of token kinds.
pub const KIND_COUNT: usize = 38;

/// The token catalog, in discriminant order.
pub static KINDS: [KindInfo; KIND_COUNT] = [
    KindInfo::processed(K::Root, "document_root", true),
    KindInfo::raw(K::Newline, "newline", Some(1)),
    KindInfo::raw(K::Text, "text", None),
    KindInfo::raw(K::Backslash, "backslash", Some(1)),
    KindInfo::raw(K::Em, "em", Some(1)),
    KindInfo::aggregate(K::EmAggregate, "em_aggregate", K::Em, K::Em).needs_children(),
    KindInfo::raw(K::Bold, "bold", Some(2)),
    KindInfo::aggregate(K::BoldAggregate, "bold_aggregate", K::Bold, K::Bold).needs_children(),
    KindInfo::raw(K::EmBold, "embold", Some(3)),
    KindInfo::aggregate(K::EmBoldAggregate, "embold_aggregate", K::EmBold, K::EmBold)
        .needs_children(),
    KindInfo::raw(K::Strikethrough, "strikethrough", Some(2)),
    KindInfo::aggregate(
        K::StrikethroughAggregate,
        "strikethrough_aggregate",
        K::Strikethrough,
        K::Strikethrough,
    )
    .needs_children(),
    KindInfo::raw(K::Heading2Marker, "heading2", Some(2)),
    KindInfo::raw(K::Heading3Marker, "heading3", Some(3)),
    KindInfo::raw(K::Heading4Marker, "heading4", Some(4)),
    KindInfo::raw(K::Heading5Marker, "heading5", Some(5)),
    KindInfo::raw(K::Heading6Marker, "heading6", Some(6)),
    KindInfo::aggregate(K::Heading2, "heading2_aggregate", K::Heading2Marker, K::Heading2Marker)
        .needs_children(),
    KindInfo::aggregate(K::Heading3, "heading3_aggregate", K::Heading3Marker, K::Heading3Marker)
        .needs_children(),
    KindInfo::aggregate(K::Heading4, "heading4_aggregate", K::Heading4Marker, K::Heading4Marker)
        .needs_children(),
    KindInfo::aggregate(K::Heading5, "heading5_aggregate", K::Heading5Marker, K::Heading5Marker)
        .needs_children(),
    KindInfo::aggregate(K::Heading6, "heading6_aggregate", K::Heading6Marker, K::Heading6Marker)
        .needs_children(),
    KindInfo::raw(K::Blockquote, "blockquote", Some(1)),
    KindInfo::aggregate(
        K::BlockquoteAggregate,
        "blockquote_aggregate",
        K::Blockquote,
        K::Newline,
    )
    .root_only()
    .needs_children(),
    KindInfo::raw(K::DirectiveStart, "directive_start", None),
    KindInfo::aggregate(K::Directive, "directive", K::DirectiveStart, K::Newline)
        .root_only()
        .flat(),
    KindInfo::raw(K::ExternalLinkStart, "external_link_start", Some(2)),
    KindInfo::raw(K::ExternalLinkEnd, "external_link_end", Some(2)),
    KindInfo::aggregate(
        K::ExternalLink,
        "external_link",
        K::ExternalLinkStart,
        K::ExternalLinkEnd,
    )
    .flat()
    .needs_children(),
    KindInfo::raw(K::EmbeddedFileStart, "embedded_file_start", Some(3)),
    KindInfo::raw(K::EmbeddedFileEnd, "embedded_file_end", Some(3)),
    KindInfo::aggregate(
        K::EmbeddedFile,
        "embedded_file",
        K::EmbeddedFileStart,
        K::EmbeddedFileEnd,
    )
    .flat()
    .needs_children(),
    KindInfo::raw(K::NoteRefStart, "note_ref_start", Some(1)),
    KindInfo::raw(K::NoteRefEnd, "note_ref_end", Some(1)),
    KindInfo::aggregate(K::NoteRef, "note_ref", K::NoteRefStart, K::NoteRefEnd)
        .flat()
        .single_text()
        .needs_children(),
    KindInfo::processed(K::Paragraph, "paragraph", true),
    KindInfo::processed(K::HtmlReady, "html_ready", false),
    KindInfo::processed(K::HtmlContainer, "html_container", true),
];

/// For each raw kind, the aggregate it opens.
static STARTS: Lazy<[Option<TokenKind>; KIND_COUNT]> = Lazy::new(|| {
    let mut starts = [None; KIND_COUNT];
    for info in &KINDS {
        if let Some(opener) = info.started_by {
            starts[opener as usize] = Some(info.kind);
        }
    }
    starts
});

impl TokenKind {
    /// Static metadata for this kind.
    pub fn info(self) -> &'static KindInfo {
        &KINDS[self as usize]
    }

    /// Name used in diagnostics and tree dumps.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Aggregate kind this raw kind opens, if any.
    pub fn starts(self) -> Option<TokenKind> {
        STARTS[self as usize]
    }

    /// Raw kind that closes this aggregate, if any.
    pub fn ended_by(self) -> Option<TokenKind> {
        self.info().ended_by
    }

    /// Heading delimiter for a run of `count` `=` characters.
    pub fn heading_marker(count: usize) -> Option<TokenKind> {
        match count {
            2 => Some(K::Heading2Marker),
            3 => Some(K::Heading3Marker),
            4 => Some(K::Heading4Marker),
            5 => Some(K::Heading5Marker),
            6 => Some(K::Heading6Marker),
            _ => None,
        }
    }

    /// Level of a heading aggregate.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            K::Heading2 => Some(2),
            K::Heading3 => Some(3),
            K::Heading4 => Some(4),
            K::Heading5 => Some(5),
            K::Heading6 => Some(6),
            _ => None,
        }
    }

    /// Kinds that stand on their own at the root instead of joining a paragraph.
    pub fn is_block(self) -> bool {
        self.heading_level().is_some()
            || matches!(self, K::BlockquoteAggregate | K::EmbeddedFile)
    }
}
