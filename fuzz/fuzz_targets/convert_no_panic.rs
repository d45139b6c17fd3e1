#![no_main]

use libfuzzer_sys::fuzz_target;
use markdownify::{ConversionError, ConversionOptions, EscapePolicy, MarkdownConverter};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    for escape in [EscapePolicy::None, EscapePolicy::Markdown] {
        let converter = MarkdownConverter::with_options(ConversionOptions {
            escape,
            clean_whitespace: data.first().is_some_and(|byte| byte & 1 == 1),
            ..Default::default()
        });

        // Parser output never holds node kinds the renderer rejects
        match converter.convert_html(&html) {
            Ok(_) | Err(ConversionError::DepthLimitExceeded(_)) => {}
            Err(error) => panic!("unexpected conversion error: {error}"),
        }
    }
});
