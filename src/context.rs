//! Render-time context threaded down the tree
//!
//! Each recursive call receives a copy of its parent's context extended with
//! the parent's own tag. Instead of keeping the full ancestor list, only the
//! facts the formatters ask about are tracked:
//!
//! - **inline**: inside a heading or table cell; block formatters demote to
//!   inline output
//! - **no-format**: inside `pre`, `code`, `kbd` or `samp`; text is neither
//!   escaped nor trimmed
//! - **inside pre**: an ancestor is `pre`, so `code` must not add backticks
//! - **inside list item**: an ancestor is `li`, so lists render nested

use crate::tags;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    inline: bool,
    no_format: bool,
    inside_pre: bool,
    inside_list_item: bool,
    depth: usize,
}

impl RenderContext {
    /// Context of the document root: no ancestors
    pub fn root() -> Self {
        Self::default()
    }

    /// Context for the children of an element named `tag`
    pub fn descend(self, tag: &str) -> Self {
        Self {
            inline: self.inline || tags::heading_level(tag).is_some() || tags::is_table_cell(tag),
            no_format: self.no_format || tags::is_preformatted(tag),
            inside_pre: self.inside_pre || tag == "pre",
            inside_list_item: self.inside_list_item || tag == "li",
            depth: self.depth + 1,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn is_no_format(&self) -> bool {
        self.no_format
    }

    pub fn is_inside_pre(&self) -> bool {
        self.inside_pre
    }

    pub fn is_inside_list_item(&self) -> bool {
        self.inside_list_item
    }

    /// Number of elements between the root and this context
    pub fn depth(&self) -> usize {
        self.depth
    }
}
