//! Document metadata: flags, command aliases, title and contributors.

use crate::SpudTextError;
use crate::parse::Compilation;
use crate::source::Span;
use crate::token::TokenKind;
use crate::tree::{Element, Node};

/// Boolean directives and the flag each one sets.
const FLAGS: &[&str] = &["center_title", "make_blue_red", "nosearchindex", "noedit"];

/// Set page flags from boolean directives.
pub(crate) fn resolve_flags(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    for &name in FLAGS {
        let list = c.directives.take(name);
        for duplicate in list.iter().skip(1) {
            c.logger.warn(
                format!("Duplicate '{name}' directive"),
                Some(duplicate.offset),
            );
        }
        if list.is_empty() {
            continue;
        }
        let flag = match name {
            "center_title" => &mut c.flags.center_title,
            "make_blue_red" => &mut c.flags.make_blue_red,
            "nosearchindex" => &mut c.flags.no_search_index,
            _ => &mut c.flags.no_edit,
        };
        *flag = true;
    }
    Ok(())
}

/// Collect search-bar command aliases.
pub(crate) fn resolve_commands(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    for directive in c.directives.take("command") {
        let command = directive.argument.trim().to_lowercase();
        if command.is_empty() {
            c.logger
                .warn("Empty 'command' directive", Some(directive.offset));
            continue;
        }
        c.commands.push(command);
    }
    Ok(())
}

/// Take the title and prepend the title heading to the root.
pub(crate) fn resolve_title(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    let list = c.directives.take("title");
    let Some(first) = list.first() else {
        return Err(SpudTextError::MissingTitle);
    };
    for duplicate in &list[1..] {
        c.logger.warn(
            "Duplicate 'title' directive, keeping the first one",
            Some(duplicate.offset),
        );
    }
    if first.argument.is_empty() {
        c.logger.warn("Empty 'title' directive", Some(first.offset));
    }

    let mut element = Element::new("h1").attr("id", "article-title");
    if c.flags.center_title {
        element = element.attr("class", "article-title-centered");
    }
    let mut node = Node::new(TokenKind::HtmlReady, Span::new(first.offset, first.offset));
    node.element = Some(element.content(first.argument.clone()));
    let id = c.tree.alloc(node);
    let root = c.tree.root();
    c.tree.prepend_child(root, id);

    c.title = Some(first.argument.clone());
    c.title_node = Some(id);
    Ok(())
}

/// Look up credited contributors.
pub(crate) fn resolve_contributors(c: &mut Compilation<'_>) -> Result<(), SpudTextError> {
    for directive in c.directives.take("contributor") {
        let name = directive.argument.as_str();
        let Some(contributor) = c.registries.contributors.find_contributor(name) else {
            c.logger
                .warn(format!("Unknown contributor '{name}'"), Some(directive.offset));
            continue;
        };
        if c
            .contributors
            .iter()
            .any(|known| known.username == contributor.username)
        {
            c.logger.warn(
                format!("Duplicate contributor '{name}'"),
                Some(directive.offset),
            );
            continue;
        }
        c.contributors.push(contributor);
    }
    Ok(())
}
