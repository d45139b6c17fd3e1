//! Newline merge engine
//!
//! Rendered fragments carry their own leading and trailing newline runs: a
//! paragraph asks for one newline on each side, a horizontal rule for two.
//! When siblings are joined, the two runs meeting at each boundary are
//! replaced by a single run as long as the longer of the two, capped at
//! [`MAX_NEWLINE_RUN`]. Newlines inside a fragment's content are left alone.
//!
//! ```rust
//! use markdownify::merge::merge_fragments;
//!
//! assert_eq!(merge_fragments(&["\nA\n", "\n\n---\n\n", "\nB\n"]), "\nA\n\n---\n\nB\n");
//! ```

/// Longest newline run a join boundary may produce
pub const MAX_NEWLINE_RUN: usize = 2;

/// Split a fragment into `(leading newlines, content, trailing newlines)`
///
/// A fragment made only of newlines is all leading run.
pub fn split_newline_runs(fragment: &str) -> (&str, &str, &str) {
    let rest = fragment.trim_start_matches('\n');
    let leading = &fragment[..fragment.len() - rest.len()];

    let content = rest.trim_end_matches('\n');
    let trailing = &rest[content.len()..];

    (leading, content, trailing)
}

/// Join rendered fragments, collapsing the newline runs at every boundary
///
/// The first fragment's leading run is treated as meeting an empty run, so it
/// is capped too. The last fragment's trailing run is kept as-is for the
/// parent's own join.
pub fn merge_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let capacity = fragments.iter().map(|f| f.as_ref().len()).sum();
    let mut output = String::with_capacity(capacity);
    let mut carried = 0usize;

    for fragment in fragments {
        let (leading, content, trailing) = split_newline_runs(fragment.as_ref());

        // A newline-only fragment joins the boundary it sits on
        if content.is_empty() {
            carried = carried.max(leading.len()).min(MAX_NEWLINE_RUN);
            continue;
        }

        let run = carried.max(leading.len()).min(MAX_NEWLINE_RUN);
        output.extend(std::iter::repeat_n('\n', run));
        output.push_str(content);

        carried = trailing.len();
    }

    output.extend(std::iter::repeat_n('\n', carried));
    output
}
