//! External links (`[[url label]]`) and embedded media (`[[[name|args]]]`).

use crate::SpudTextError;
use crate::parse::Compilation;
use crate::source::Span;
use crate::token::TokenKind;
use crate::tree::{Element, Node, NodeId, Tree};

const DEFAULT_WIDTH: u32 = 30;
const NEW_CONTEXT_REL: &str = "noopener noreferrer";

/// Horizontal placement of an embedded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Floated left
    Left,
    /// Floated right
    #[default]
    Right,
}

impl Align {
    fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
        }
    }
}

/// Parsed content of an embedded-file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedArgs {
    /// Media name
    pub name: String,
    /// Width in percent, as written
    pub width: Option<u32>,
    /// Placement
    pub align: Align,
    /// Caption override
    pub caption: Option<String>,
}

/// Parse `name|arg|arg...`. Arguments are order-independent: an integer is a
/// width, `left`/`right` an alignment, anything else the caption.
///
/// ```
/// use spudtext_core::links::{Align, parse_embed};
///
/// let args = parse_embed("logo.png | 50 | left | My caption");
/// assert_eq!(args.name, "logo.png");
/// assert_eq!(args.width, Some(50));
/// assert_eq!(args.align, Align::Left);
/// assert_eq!(args.caption.as_deref(), Some("My caption"));
/// ```
pub fn parse_embed(content: &str) -> EmbedArgs {
    let content = content.trim();
    let end = content
        .find(|c: char| c == '|' || c.is_whitespace())
        .unwrap_or(content.len());
    let (name, rest) = content.split_at(end);
    let mut args = EmbedArgs {
        name: name.to_string(),
        width: None,
        align: Align::default(),
        caption: None,
    };
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('|').unwrap_or(rest);
    for arg in rest.split('|').map(str::trim).filter(|arg| !arg.is_empty()) {
        if let Ok(width) = arg.parse::<u32>() {
            args.width = Some(width);
        } else if arg.eq_ignore_ascii_case("left") {
            args.align = Align::Left;
        } else if arg.eq_ignore_ascii_case("right") {
            args.align = Align::Right;
        } else {
            args.caption = Some(arg.to_string());
        }
    }
    args
}

fn nodes_of(tree: &Tree, kind: TokenKind) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| tree[id].kind == kind)
        .collect()
}

fn element_node(kind: TokenKind, element: Element) -> Node {
    let mut node = Node::new(kind, Span::default());
    node.element = Some(element);
    node
}

/// Turn every `[[...]]` into an anchor opening in a new browsing context.
pub(crate) fn resolve_external_links(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    for id in nodes_of(&c.tree, TokenKind::ExternalLink) {
        let content = c.tree.text_content(id);
        let content = content.trim();
        let (href, label) = match content.split_once(char::is_whitespace) {
            Some((href, label)) if !label.trim().is_empty() => (href, label.trim()),
            _ => (content, content),
        };
        if href.is_empty() {
            c.logger
                .warn("Removed external link without a target", Some(c.tree[id].offset()));
            c.tree.remove(id);
            continue;
        }
        let element = Element::new("a")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", NEW_CONTEXT_REL)
            .content(label);
        c.tree.clear_children(id);
        let node = &mut c.tree[id];
        node.kind = TokenKind::HtmlReady;
        node.element = Some(element);
    }
    Ok(())
}

/// Turn every `[[[...]]]` into a captioned figure, dropping unknown media.
pub(crate) fn resolve_embedded_files(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    for id in nodes_of(&c.tree, TokenKind::EmbeddedFile) {
        let offset = c.tree[id].offset();
        let args = parse_embed(&c.tree.text_content(id));
        let Some(media) = c.registries.media.find_media(&args.name) else {
            c.logger
                .warn(format!("Unknown media file '{}'", args.name), Some(offset));
            c.tree.remove(id);
            continue;
        };

        let width = match args.width {
            None => DEFAULT_WIDTH,
            Some(width @ 1..=100) => width,
            Some(width) => {
                let clamped = width.clamp(1, 100);
                c.logger.warn(
                    format!("Width {width}% of '{}' is out of range, using {clamped}%", args.name),
                    Some(offset),
                );
                clamped
            }
        };
        let caption = args.caption.unwrap_or(media.description);

        c.tree.clear_children(id);
        {
            let node = &mut c.tree[id];
            node.kind = TokenKind::HtmlContainer;
            node.element = Some(
                Element::new("figure")
                    .attr("class", format!("embedded-file float-{}", args.align.as_str()))
                    .attr("style", format!("width:{width}%")),
            );
        }
        let anchor = c.tree.push(
            id,
            element_node(
                TokenKind::HtmlContainer,
                Element::new("a")
                    .attr("href", media.link.clone())
                    .attr("target", "_blank")
                    .attr("rel", NEW_CONTEXT_REL),
            ),
        );
        c.tree.push(
            anchor,
            element_node(
                TokenKind::HtmlReady,
                Element::new("img")
                    .attr("src", media.link)
                    .attr("alt", caption.clone()),
            ),
        );
        c.tree.push(
            id,
            element_node(
                TokenKind::HtmlReady,
                Element::new("figcaption").content(caption),
            ),
        );
    }
    Ok(())
}
