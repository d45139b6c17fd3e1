//! Markdownify - context-sensitive HTML to Markdown renderer
//!
//! This library turns an HTML document into Markdown text. Rendering is a
//! single bottom-up pass over the parsed tree: every element's output depends
//! on its own tag, the tags of its ancestors, and its siblings.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `parser`: HTML5 parsing using html5ever
//! - `tree`: index-based document tree with parent and sibling links
//! - `tags`: tag classification tables
//! - `context`: ancestor facts carried down the recursion
//! - `text`: whitespace and escaping rules for text nodes
//! - `merge`: newline-run merging between sibling fragments
//! - `cleaner`: optional whitespace pre-pass
//! - `converter`: per-element formatting rules
//!
//! # Example
//!
//! ```rust
//! let markdown = markdownify::convert("<h1>Hello</h1><p>World</p>").expect("Failed to convert");
//! assert_eq!(markdown, "\n# Hello\nWorld\n");
//! ```

pub mod cleaner;
pub mod context;
pub mod converter;
pub mod error;
pub mod merge;
pub mod parser;
pub mod tags;
pub mod text;
pub mod tree;

// Re-export main types for convenience
pub use context::RenderContext;
pub use converter::{ConversionOptions, MarkdownConverter};
pub use error::ConversionError;
pub use parser::parse_html;
pub use text::EscapePolicy;
pub use tree::{Document, NodeId};

/// Convert an HTML string to Markdown with default options
pub fn convert(html: &str) -> Result<String, ConversionError> {
    MarkdownConverter::new().convert_html(html)
}

/// Convert an HTML string to Markdown with custom options
pub fn convert_with_options(
    html: &str,
    options: ConversionOptions,
) -> Result<String, ConversionError> {
    MarkdownConverter::with_options(options).convert_html(html)
}
