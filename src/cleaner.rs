//! Whitespace pre-pass
//!
//! Produces a copy of a document in which every text node has its leading and
//! trailing whitespace removed. Pure whitespace between block elements then
//! renders as nothing at all. The pass is idempotent and never touches
//! element structure; it runs to completion before rendering starts.
//!
//! The trim is unconditional, including inside `pre`, and it also removes the
//! spaces that separate inline siblings (`a <b>b</b>` becomes `a**b**`). It is
//! therefore off by default; see `ConversionOptions::clean_whitespace`.

use crate::tree::Document;

/// Return a copy of `doc` with all text nodes trimmed
pub fn clean_whitespace(doc: &Document) -> Document {
    let mut cleaned = doc.clone();
    for id in doc.node_ids() {
        if let Some(text) = doc.text(id) {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                cleaned.set_text(id, trimmed.to_string());
            }
        }
    }
    cleaned
}
