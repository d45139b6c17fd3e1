//! HTML5 parser using html5ever
//!
//! This module provides HTML parsing functionality that handles malformed
//! markup gracefully according to the HTML5 specification.
//!
//! # Overview
//!
//! The parser uses Mozilla's html5ever library, which implements the WHATWG HTML5
//! parsing algorithm. Even malformed HTML is parsed consistently and predictably,
//! following the same rules as modern web browsers. Entities are decoded and tag
//! names are lower-cased by the tokenizer, so every text node handed to the
//! renderer already holds its final characters.
//!
//! # Examples
//!
//! ```rust
//! use markdownify::parser::parse_html;
//!
//! // Parse well-formed HTML
//! let dom = parse_html("<html><body><h1>Hello</h1></body></html>");
//!
//! // Parse malformed HTML (missing closing tags)
//! let dom = parse_html("<html><body><h1>Hello");
//! ```
//!
//! # Configuration
//!
//! The parser uses default html5ever configuration:
//! - **Scripting**: Disabled (scripts are not executed)
//! - **Error Handling**: Errors are collected but parsing continues
//! - **Tree Builder**: Uses RcDom for reference-counted DOM nodes
//!
//! The caller is expected to normalize line endings before parsing.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::RcDom;

/// Parse an HTML string into a DOM tree
///
/// html5ever never rejects input: missing tags are inserted, misnested tags
/// are repaired and an empty string yields a document holding only the
/// implied `html`, `head` and `body` elements.
///
/// # Examples
///
/// ```rust
/// use markdownify::parser::parse_html;
///
/// let dom = parse_html("<h1>Title</h1><p>Content</p>");
/// assert!(!dom.document.children.borrow().is_empty());
/// ```
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}
