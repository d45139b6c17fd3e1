//! Tag classification tables
//!
//! Static, read-only lookups that answer "what kind of tag is this" for the
//! renderer. Unrecognized names simply fall through every check; nothing here
//! can fail.
//!
//! [`TagKind`] is the closed set of formatting rules the renderer dispatches
//! on. Adding a new rule means adding a variant, and the compiler then points
//! at every `match` that has to learn about it.

use regex::Regex;
use std::sync::OnceLock;

/// Non-content elements, dropped together with everything inside them
const IGNORED_TAGS: &[&str] = &[
    "script", "style", "noscript", "head", "meta", "link", "svg", "path", "button", "title",
    "iframe", "font",
];

/// Elements whose inner and adjacent whitespace is trimmed
const BLOCK_LEVEL_TAGS: &[&str] = &[
    "p",
    "div",
    "section",
    "article",
    "blockquote",
    "ul",
    "ol",
    "li",
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "td",
    "th",
];

/// Elements whose content is emitted without escaping or trimming
const PREFORMATTED_TAGS: &[&str] = &["pre", "code", "kbd", "samp"];

const TABLE_CELL_TAGS: &[&str] = &["td", "th"];

const LIST_TAGS: &[&str] = &["ul", "ol"];

/// Structural wrappers rendered as plain pass-through without a diagnostic
const PASSTHROUGH_TAGS: &[&str] = &[
    "html", "body", "span", "thead", "tbody", "tfoot", "kbd", "samp",
];

/// True for non-content tags (`script`, `style`, `head`, ...)
pub fn is_ignored(name: &str) -> bool {
    IGNORED_TAGS.contains(&name)
}

/// True for tags whose inner and adjacent whitespace is trimmed
pub fn is_block_level(name: &str) -> bool {
    BLOCK_LEVEL_TAGS.contains(&name) || heading_level(name).is_some()
}

/// True for tags that trim whitespace next to them
///
/// Same as [`is_block_level`] plus `pre`, which always trims outside even
/// though its own content is left alone.
pub fn trims_adjacent_whitespace(name: &str) -> bool {
    name == "pre" || is_block_level(name)
}

/// True for `pre`, `code`, `kbd` and `samp`
pub fn is_preformatted(name: &str) -> bool {
    PREFORMATTED_TAGS.contains(&name)
}

/// True for `td` and `th`
pub fn is_table_cell(name: &str) -> bool {
    TABLE_CELL_TAGS.contains(&name)
}

/// True for `ul` and `ol`
pub fn is_list(name: &str) -> bool {
    LIST_TAGS.contains(&name)
}

/// Heading level for `h1`..`h6`
///
/// Names shaped like a heading but outside the Markdown range (`h0`, `h7`)
/// are not headings.
pub fn heading_level(name: &str) -> Option<u8> {
    static HEADING_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = HEADING_REGEX
        .get_or_init(|| Regex::new(r"^h(\d+)$").ok())
        .as_ref()?;

    let level: u8 = regex.captures(name)?.get(1)?.as_str().parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Formatting rule selected for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind<'a> {
    /// Non-content element, always empty
    Ignored,
    /// `div`, `section`, `article`, `p`
    Block,
    /// `h1`..`h6`
    Heading(u8),
    /// `b`, `strong`
    Bold,
    /// `i`, `em`
    Italic,
    Code,
    Pre,
    Link,
    Image,
    HorizontalRule,
    LineBreak,
    Blockquote,
    /// `ul`, `ol`
    List,
    ListItem,
    Table,
    TableRow,
    /// `td`, `th`
    TableCell,
    /// Known wrapper with no Markdown of its own
    Passthrough,
    /// Anything else; rendered as pass-through and reported
    Unknown(&'a str),
}

impl<'a> TagKind<'a> {
    /// Select the formatting rule for a lower-cased tag name
    pub fn classify(name: &'a str) -> Self {
        if is_ignored(name) {
            return TagKind::Ignored;
        }

        match name {
            "div" | "section" | "article" | "p" => TagKind::Block,
            "b" | "strong" => TagKind::Bold,
            "i" | "em" => TagKind::Italic,
            "code" => TagKind::Code,
            "pre" => TagKind::Pre,
            "a" => TagKind::Link,
            "img" => TagKind::Image,
            "hr" => TagKind::HorizontalRule,
            "br" => TagKind::LineBreak,
            "blockquote" => TagKind::Blockquote,
            "ul" | "ol" => TagKind::List,
            "li" => TagKind::ListItem,
            "table" => TagKind::Table,
            "tr" => TagKind::TableRow,
            "td" | "th" => TagKind::TableCell,
            _ => {
                if let Some(level) = heading_level(name) {
                    TagKind::Heading(level)
                } else if PASSTHROUGH_TAGS.contains(&name) {
                    TagKind::Passthrough
                } else {
                    TagKind::Unknown(name)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_tags() {
        for tag in ["script", "style", "head", "meta", "link", "svg", "path", "button", "title", "iframe", "font"] {
            assert!(is_ignored(tag), "{tag} should be ignored");
        }
        assert!(!is_ignored("img"));
        assert!(!is_ignored("p"));
    }

    #[test]
    fn test_block_level_tags() {
        for tag in ["p", "div", "section", "article", "blockquote", "ul", "ol", "li", "table", "tr", "td", "th", "h1", "h6"] {
            assert!(is_block_level(tag), "{tag} should be block-level");
        }
        assert!(!is_block_level("span"));
        assert!(!is_block_level("pre"));
        assert!(trims_adjacent_whitespace("pre"));
        assert!(!trims_adjacent_whitespace("a"));
    }

    #[test]
    fn test_preformatted_and_cells() {
        for tag in ["pre", "code", "kbd", "samp"] {
            assert!(is_preformatted(tag));
        }
        assert!(!is_preformatted("p"));
        assert!(is_table_cell("td"));
        assert!(is_table_cell("th"));
        assert!(!is_table_cell("tr"));
        assert!(is_list("ul"));
        assert!(is_list("ol"));
        assert!(!is_list("li"));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("h0"), None);
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("th"), None);
        assert_eq!(heading_level("h"), None);
        assert_eq!(heading_level("h12"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(TagKind::classify("h3"), TagKind::Heading(3));
        assert_eq!(TagKind::classify("strong"), TagKind::Bold);
        assert_eq!(TagKind::classify("em"), TagKind::Italic);
        assert_eq!(TagKind::classify("script"), TagKind::Ignored);
        assert_eq!(TagKind::classify("font"), TagKind::Ignored);
        assert_eq!(TagKind::classify("body"), TagKind::Passthrough);
        assert_eq!(TagKind::classify("tbody"), TagKind::Passthrough);
        assert_eq!(TagKind::classify("marquee"), TagKind::Unknown("marquee"));
    }
}
