//! Text node rendering
//!
//! A text node's output depends on where it sits:
//!
//! - Inside a no-format region (`pre`, `code`, `kbd`, `samp`) the characters
//!   are emitted exactly as parsed.
//! - Elsewhere whitespace runs collapse to a single space (when enabled), the
//!   configured [`EscapePolicy`] is applied, and whitespace next to block-level
//!   boundaries is trimmed.
//!
//! Leading whitespace is trimmed when the previous sibling trims adjacent
//! whitespace (block-level or `pre`), or when there is no previous sibling and
//! the parent is block-level. Trailing whitespace follows the same rule with
//! the next sibling.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::context::RenderContext;
use crate::converter::ConversionOptions;
use crate::tags;
use crate::tree::{Document, NodeId};

/// How Markdown-significant characters in plain text are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// Emit text unchanged
    #[default]
    None,
    /// Backslash-escape `` \ ` * _ [ ] ( ) ``
    Markdown,
}

const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '`', '*', '_', '[', ']', '(', ')'];

/// Render a text node for its position in the tree
///
/// Returns an empty string for non-text nodes. A whitespace-only node next to
/// a block boundary renders empty; the caller drops empty fragments.
pub fn render_text(
    doc: &Document,
    id: NodeId,
    ctx: RenderContext,
    options: &ConversionOptions,
) -> String {
    let Some(raw) = doc.text(id) else {
        return String::new();
    };

    if ctx.is_no_format() {
        return raw.to_string();
    }

    let collapsed = if options.collapse_whitespace {
        collapse_whitespace(raw)
    } else {
        Cow::Borrowed(raw)
    };

    let escaped = match options.escape {
        EscapePolicy::None => collapsed,
        EscapePolicy::Markdown => Cow::Owned(escape_markdown(&collapsed).into_owned()),
    };

    let mut text: &str = &escaped;
    if trims_leading(doc, id) {
        text = text.trim_start();
    }
    if trims_trailing(doc, id) {
        text = text.trim_end();
    }
    text.to_string()
}

/// Replace every run of HTML whitespace with a single space
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    static WHITESPACE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    match WHITESPACE_REGEX.get_or_init(|| Regex::new(r"[ \t\n\r\x0C]+").ok()) {
        Some(regex) => regex.replace_all(text, " "),
        None => Cow::Borrowed(text),
    }
}

/// Backslash-escape Markdown-significant characters
pub fn escape_markdown(text: &str) -> Cow<'_, str> {
    if !text.contains(MARKDOWN_SPECIAL_CHARS) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

fn trims_leading(doc: &Document, id: NodeId) -> bool {
    match doc.prev_sibling(id) {
        Some(prev) => sibling_trims(doc, prev),
        None => parent_is_block(doc, id),
    }
}

fn trims_trailing(doc: &Document, id: NodeId) -> bool {
    match doc.next_sibling(id) {
        Some(next) => sibling_trims(doc, next),
        None => parent_is_block(doc, id),
    }
}

fn sibling_trims(doc: &Document, sibling: NodeId) -> bool {
    doc.tag_name(sibling)
        .is_some_and(tags::trims_adjacent_whitespace)
}

fn parent_is_block(doc: &Document, id: NodeId) -> bool {
    doc.parent(id)
        .and_then(|parent| doc.tag_name(parent))
        .is_some_and(tags::is_block_level)
}
