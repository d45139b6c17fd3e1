//! Error types for conversion operations

/// Errors that can occur during HTML to Markdown conversion
///
/// Only structural problems abort a conversion. Bad attribute values,
/// unknown tags and empty documents are recovered locally and never
/// surface here.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The parser handed over a node the renderer cannot interpret
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// Element nesting exceeded the configured limit
    #[error("Element nesting exceeds maximum depth of {0}")]
    DepthLimitExceeded(usize),
}
