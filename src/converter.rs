//! Markdown converter - renders a document tree to Markdown
//!
//! This module holds the recursive renderer. Every element is handled the
//! same way:
//!
//! 1. Ignored elements (`script`, `style`, `head`, ...) render as nothing,
//!    without looking at their children.
//! 2. The children are rendered with a [`RenderContext`] extended by this
//!    element's tag.
//! 3. Empty child fragments are dropped and the rest are joined by the
//!    [newline merge engine](crate::merge). Inside `pre` the fragments are
//!    concatenated verbatim instead.
//! 4. The element's formatter turns the joined text into this element's
//!    fragment. Formatters receive the *parent's* context so they can ask
//!    whether they sit inside a heading, a table cell, a list item or `pre`.
//!
//! # Examples
//!
//! Input HTML:
//! ```html
//! <h1>Title</h1>
//! <ol start="3">
//!   <li>Three</li>
//!   <li>Four</li>
//! </ol>
//! ```
//!
//! Output Markdown:
//! ```markdown
//!
//! # Title
//!
//! 3. Three
//! 4. Four
//!
//! ```
//!
//! # Tables
//!
//! Each cell renders as ` text |` (repeated per `colspan`) and each row
//! prefixes its cells with `|`. A row is a header row when every cell is a
//! `th` or the row sits in `thead`; a `| --- |`-style separator follows it.
//! When no row of the table is a header row, a blank header and separator are
//! synthesized in front of the first row.

use markup5ever_rcdom::RcDom;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::context::RenderContext;
use crate::error::ConversionError;
use crate::merge::merge_fragments;
use crate::parser::parse_html;
use crate::tags::{self, TagKind};
use crate::text::{self, EscapePolicy};
use crate::tree::{Document, NodeId, NodeKind};

/// Maximum element nesting accepted by default
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Conversion options
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Escaping applied to text outside no-format regions
    pub escape: EscapePolicy,
    /// Collapse whitespace runs in text to single spaces
    pub collapse_whitespace: bool,
    /// Trim every text node before rendering
    pub clean_whitespace: bool,
    /// Maximum element nesting depth
    pub max_depth: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            escape: EscapePolicy::None,
            collapse_whitespace: true,
            clean_whitespace: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Main Markdown converter
///
/// The converter holds only its options, so one instance can serve any
/// number of conversions, concurrently if needed. Each call owns its own
/// document, contexts and fragment buffers.
///
/// # Usage
///
/// ```rust
/// use markdownify::converter::{ConversionOptions, MarkdownConverter};
/// use markdownify::text::EscapePolicy;
///
/// let converter = MarkdownConverter::new();
/// let markdown = converter.convert_html("<b>Hello</b>").expect("Failed to convert");
/// assert_eq!(markdown, "**Hello**");
///
/// let options = ConversionOptions {
///     escape: EscapePolicy::Markdown,
///     ..Default::default()
/// };
/// let converter = MarkdownConverter::with_options(options);
/// let markdown = converter.convert_html("<span>2*3</span>").expect("Failed to convert");
/// assert_eq!(markdown, "2\\*3");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    options: ConversionOptions,
}

impl MarkdownConverter {
    /// Create a new converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new converter with custom options
    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Parse and convert an HTML string
    ///
    /// # Errors
    ///
    /// See [`MarkdownConverter::convert_document`].
    pub fn convert_html(&self, html: &str) -> Result<String, ConversionError> {
        self.convert(&parse_html(html))
    }

    /// Convert an html5ever DOM tree to Markdown
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::InvariantViolation` if the DOM holds a node
    /// kind the renderer cannot interpret, plus anything
    /// [`MarkdownConverter::convert_document`] returns.
    pub fn convert(&self, dom: &RcDom) -> Result<String, ConversionError> {
        let doc = Document::from_dom(dom)?;
        self.convert_document(&doc)
    }

    /// Convert an arena document to Markdown
    ///
    /// The whitespace pre-pass runs first when enabled. The output is not
    /// trimmed: leading and trailing newlines are whatever the outermost
    /// formatters produced.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::DepthLimitExceeded` when elements nest deeper
    /// than `max_depth`.
    pub fn convert_document(&self, doc: &Document) -> Result<String, ConversionError> {
        let markdown = if self.options.clean_whitespace {
            let cleaned = crate::cleaner::clean_whitespace(doc);
            self.render_node(&cleaned, NodeId::ROOT, RenderContext::root())?
        } else {
            self.render_node(doc, NodeId::ROOT, RenderContext::root())?
        };

        tracing::debug!(
            nodes = doc.len(),
            output_len = markdown.len(),
            "converted document"
        );
        Ok(markdown)
    }

    /// Render any node: text goes through the text normalizer, everything
    /// else through [`MarkdownConverter::render_element`]
    pub fn render_node(
        &self,
        doc: &Document,
        id: NodeId,
        ctx: RenderContext,
    ) -> Result<String, ConversionError> {
        match doc.node(id).kind {
            NodeKind::Text(_) => Ok(text::render_text(doc, id, ctx, &self.options)),
            NodeKind::Element { .. } | NodeKind::Document => self.render_element(doc, id, ctx),
        }
    }

    /// Render an element (or the document root) and its subtree
    ///
    /// `parent_ctx` is the context of the element's parent; the element's own
    /// tag is added before its children are rendered.
    pub fn render_element(
        &self,
        doc: &Document,
        id: NodeId,
        parent_ctx: RenderContext,
    ) -> Result<String, ConversionError> {
        let name = doc.tag_name(id).unwrap_or("");
        let kind = match doc.node(id).kind {
            NodeKind::Document => TagKind::Passthrough,
            _ => TagKind::classify(name),
        };

        if kind == TagKind::Ignored {
            return Ok(String::new());
        }

        let ctx = parent_ctx.descend(name);
        if ctx.depth() > self.options.max_depth {
            return Err(ConversionError::DepthLimitExceeded(self.options.max_depth));
        }

        let mut fragments = Vec::with_capacity(doc.children(id).len());
        for &child in doc.children(id) {
            let fragment = self.render_node(doc, child, ctx)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        let verbatim = name == "pre" || parent_tag(doc, id) == Some("pre");
        let text = if verbatim {
            fragments.concat()
        } else {
            merge_fragments(&fragments)
        };

        Ok(format_element(doc, id, kind, text, parent_ctx))
    }
}

/// Apply the formatting rule for `kind` to already-rendered child text
fn format_element(
    doc: &Document,
    id: NodeId,
    kind: TagKind<'_>,
    text: String,
    parent_ctx: RenderContext,
) -> String {
    match kind {
        TagKind::Ignored => String::new(),
        TagKind::Block => convert_block(&text, parent_ctx),
        TagKind::Heading(level) => convert_heading(level, text, parent_ctx),
        TagKind::Bold => wrap_inline(text, "**"),
        TagKind::Italic => wrap_inline(text, "_"),
        TagKind::Code => {
            if parent_ctx.is_inside_pre() {
                text
            } else {
                wrap_inline(text, "`")
            }
        }
        TagKind::Pre => convert_pre(doc, id, &text),
        TagKind::Link => convert_link(doc, id, text, parent_ctx),
        TagKind::Image => convert_image(doc, id),
        TagKind::HorizontalRule => "\n\n---\n\n".to_string(),
        TagKind::LineBreak => "  \n".to_string(),
        TagKind::Blockquote => convert_blockquote(&text),
        TagKind::List => convert_list(doc, id, &text, parent_ctx),
        TagKind::ListItem => convert_list_item(doc, id, &text, parent_ctx),
        TagKind::Table => convert_table(&text),
        TagKind::TableRow => convert_table_row(doc, id, &text),
        TagKind::TableCell => convert_table_cell(doc, id, &text),
        TagKind::Passthrough => text,
        TagKind::Unknown(name) => {
            tracing::debug!(tag = name, "no markdown rule for element, passing content through");
            text
        }
    }
}

fn parent_tag(doc: &Document, id: NodeId) -> Option<&str> {
    doc.parent(id).and_then(|parent| doc.tag_name(parent))
}

fn wrap_inline(text: String, marker: &str) -> String {
    if text.is_empty() {
        return text;
    }
    format!("{marker}{text}{marker}")
}

/// `div`, `section`, `article`, `p`
fn convert_block(text: &str, parent_ctx: RenderContext) -> String {
    let trimmed = text.trim();
    if parent_ctx.is_inline() {
        return format!(" {trimmed} ");
    }
    if trimmed.is_empty() {
        return String::new();
    }
    format!("\n{trimmed}\n")
}

fn convert_heading(level: u8, text: String, parent_ctx: RenderContext) -> String {
    if parent_ctx.is_inline() {
        return text;
    }
    let hashes = "#".repeat(usize::from(level));
    format!("\n{hashes} {text}\n")
}

/// Fenced code block; the info string comes from a `language-*` or `lang-*`
/// class on a child `code` element
fn convert_pre(doc: &Document, id: NodeId, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let language = code_language(doc, id).unwrap_or("");
    format!("\n\n```{language}\n{text}\n```\n\n")
}

fn code_language(doc: &Document, pre: NodeId) -> Option<&str> {
    doc.element_children(pre)
        .filter(|child| doc.tag_name(*child) == Some("code"))
        .filter_map(|code| doc.attr(code, "class"))
        .flat_map(str::split_whitespace)
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .filter(|language| !language.is_empty())
}

fn convert_link(doc: &Document, id: NodeId, text: String, parent_ctx: RenderContext) -> String {
    if parent_ctx.is_no_format() {
        return text;
    }
    let href = doc.attr(id, "href").unwrap_or("");
    format!("[{}]({})", text.trim(), href.trim())
}

fn convert_image(doc: &Document, id: NodeId) -> String {
    let alt = doc.attr(id, "alt").unwrap_or("");
    let src = doc.attr(id, "src").unwrap_or("");
    format!("![{alt}]({src})")
}

/// Prefix every line with `> `; lines that already start with `>` (from a
/// nested quote) get a bare `>` so markers merge into `>>`
fn convert_blockquote(text: &str) -> String {
    let body = text.trim_matches('\n');
    if body.trim().is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for line in body.split('\n') {
        let quoted = if line.starts_with('>') {
            format!(">{line}")
        } else if line.is_empty() {
            ">".to_string()
        } else {
            format!("> {line}")
        };

        // adjacent empty quote lines collapse into one
        if quoted == ">" && lines.last().is_some_and(|last| last == ">") {
            continue;
        }
        lines.push(quoted);
    }
    if lines.last().is_some_and(|last| last == ">") {
        lines.pop();
    }

    format!("\n{}\n", lines.join("\n"))
}

/// `ul`, `ol`
fn convert_list(doc: &Document, id: NodeId, text: &str, parent_ctx: RenderContext) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // Nested lists sit directly under the parent item's first line
    if parent_ctx.is_inside_list_item() {
        return format!("\n{}", text.trim_start_matches('\n').trim_end());
    }

    let followed_by_list = doc
        .next_content_sibling(id)
        .and_then(|sibling| doc.tag_name(sibling))
        .is_some_and(tags::is_list);
    if followed_by_list {
        format!("\n\n{text}")
    } else {
        format!("\n\n{text}\n")
    }
}

fn convert_list_item(doc: &Document, id: NodeId, text: &str, parent_ctx: RenderContext) -> String {
    let body = text.trim();
    if body.is_empty() {
        return String::new();
    }

    let marker = format!("{} ", list_bullet(doc, id));
    let indent = " ".repeat(marker.len());

    let mut item = String::with_capacity(body.len() + marker.len() + 2);
    for (index, line) in body.split('\n').enumerate() {
        if index == 0 {
            item.push_str(&marker);
            item.push_str(line);
        } else {
            item.push('\n');
            if !line.is_empty() {
                item.push_str(&indent);
                item.push_str(line);
            }
        }
    }

    if parent_ctx.is_inside_list_item() {
        if doc.prev_element_sibling(id).is_none() {
            return format!("\n{item}\n");
        }
        if doc.next_element_sibling(id).is_none() {
            return item;
        }
    }
    item.push('\n');
    item
}

/// `N.` for items of an `ol` (from its `start`, default 1), `-` otherwise
fn list_bullet(doc: &Document, id: NodeId) -> String {
    match doc.parent(id) {
        Some(list) if doc.tag_name(list) == Some("ol") => {
            let start = doc
                .attr(list, "start")
                .and_then(|value| value.trim().parse::<i64>().ok())
                .unwrap_or(1);
            let ordinal = i64::try_from(doc.element_index(id)).unwrap_or(i64::MAX);
            format!("{}.", start.saturating_add(ordinal))
        }
        _ => "-".to_string(),
    }
}

/// Rows already end in a newline, so the table only adds one in front
fn convert_table(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("\n{text}")
}

fn convert_table_row(doc: &Document, id: NodeId, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let row = format!("|{text}");
    let columns = column_count(doc, id);
    let separator = format!("|{}", "---|".repeat(columns));

    if is_header_row(doc, id) {
        return format!("{row}\n{separator}\n");
    }

    if let Some(table) = enclosing_table(doc, id) {
        let rows = table_rows(doc, table);
        let is_first_row = rows.first() == Some(&id);
        if is_first_row && !rows.iter().any(|candidate| is_header_row(doc, *candidate)) {
            let blank_header = format!("|{}", "  |".repeat(columns));
            return format!("{blank_header}\n{separator}\n{row}\n");
        }
    }

    format!("{row}\n")
}

/// Cell content on one physical line, padded with one ` |` per spanned column
fn convert_table_cell(doc: &Document, id: NodeId, text: &str) -> String {
    let content = join_cell_lines(text.trim());
    format!(" {content}{}", " |".repeat(colspan(doc, id)))
}

/// Replace each line break, with the spaces around it, by a single space
fn join_cell_lines(text: &str) -> Cow<'_, str> {
    static LINE_BREAK_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    match LINE_BREAK_REGEX.get_or_init(|| Regex::new(r"[ \t]*(?:[\r\n][ \t]*)+").ok()) {
        Some(regex) => regex.replace_all(text, " "),
        None => Cow::Borrowed(text),
    }
}

fn colspan(doc: &Document, cell: NodeId) -> usize {
    doc.attr(cell, "colspan")
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

fn row_cells(doc: &Document, row: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    doc.element_children(row)
        .filter(|child| doc.tag_name(*child).is_some_and(tags::is_table_cell))
}

fn column_count(doc: &Document, row: NodeId) -> usize {
    row_cells(doc, row).map(|cell| colspan(doc, cell)).sum()
}

fn is_header_row(doc: &Document, row: NodeId) -> bool {
    if parent_tag(doc, row) == Some("thead") {
        return true;
    }
    let mut cells = row_cells(doc, row).peekable();
    cells.peek().is_some() && cells.all(|cell| doc.tag_name(cell) == Some("th"))
}

fn enclosing_table(doc: &Document, row: NodeId) -> Option<NodeId> {
    let parent = doc.parent(row)?;
    match doc.tag_name(parent)? {
        "table" => Some(parent),
        "thead" | "tbody" | "tfoot" => doc
            .parent(parent)
            .filter(|grandparent| doc.tag_name(*grandparent) == Some("table")),
        _ => None,
    }
}

/// Rows of a table in document order, through `thead`/`tbody`/`tfoot`
fn table_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    for child in doc.element_children(table) {
        match doc.tag_name(child) {
            Some("tr") => rows.push(child),
            Some("thead" | "tbody" | "tfoot") => rows.extend(
                doc.element_children(child)
                    .filter(|row| doc.tag_name(*row) == Some("tr")),
            ),
            _ => {}
        }
    }
    rows
}
