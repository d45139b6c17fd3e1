#![no_main]

use libfuzzer_sys::fuzz_target;
use markdownify::merge::{MAX_NEWLINE_RUN, merge_fragments, split_newline_runs};

fuzz_target!(|raw: Vec<String>| {
    // Flatten newlines inside each fragment's content so that every newline
    // run in the merged output comes from a boundary
    let fragments: Vec<String> = raw
        .iter()
        .map(|fragment| {
            let (leading, content, trailing) = split_newline_runs(fragment);
            format!("{leading}{}{trailing}", content.replace('\n', " "))
        })
        .collect();

    let merged = merge_fragments(&fragments);

    let longest_run = merged
        .trim_end_matches('\n')
        .split(|ch| ch != '\n')
        .map(str::len)
        .max()
        .unwrap_or(0);
    assert!(longest_run <= MAX_NEWLINE_RUN, "{merged:?}");

    let content: String = fragments
        .iter()
        .map(|fragment| split_newline_runs(fragment).1)
        .collect();
    assert_eq!(merged.replace('\n', ""), content);
});
