//! End-to-end conversion tests
//!
//! Each test feeds an HTML string through the public entry points and checks
//! the exact Markdown produced.

use markdownify::{ConversionOptions, EscapePolicy, MarkdownConverter, convert};
use pretty_assertions::assert_eq;

fn md(html: &str) -> String {
    convert(html).expect("Failed to convert")
}

#[test]
fn test_basic_elements() {
    assert_eq!(md("<span>Hello</span>"), "Hello");
    assert_eq!(md("<h1>Hello</h1>"), "\n# Hello\n");
    assert_eq!(
        md(r#"<a href="http://example.com">Hello</a>"#),
        "[Hello](http://example.com)"
    );
    assert_eq!(md("<b>Hello</b>"), "**Hello**");
    assert_eq!(md("<strong>Hello</strong>"), "**Hello**");
    assert_eq!(md("<hr>"), "\n\n---\n\n");
    assert_eq!(
        md(r#"<img src="http://example.com/test.png" alt="Image title"/>"#),
        "![Image title](http://example.com/test.png)"
    );
}

#[test]
fn test_empty_and_degenerate_input() {
    assert_eq!(md(""), "");
    assert_eq!(md("   \n\t "), "");
    assert_eq!(md("<!-- only a comment -->"), "");
    assert_eq!(md("<!DOCTYPE html><script>var a = 1;</script>"), "");
}

#[test]
fn test_ordered_list_start_numbering() {
    let html = r#"
        <ol start="3">
            <li>Three</li>
            <li>Four</li>
            <li>Five</li>
            <li>Six</li>
        </ol>
    "#;
    let markdown = md(html);
    let markers: Vec<&str> = markdown
        .lines()
        .filter_map(|line| line.split_once(' ').map(|(marker, _)| marker))
        .collect();
    assert_eq!(markers, vec!["3.", "4.", "5.", "6."]);
}

#[test]
fn test_headless_table_gets_blank_header() {
    let html = r#"
        <table>
            <tr><td>a</td><td>b</td></tr>
            <tr><td>c</td><td>d</td></tr>
        </table>
    "#;
    let markdown = md(html);
    let lines: Vec<&str> = markdown.lines().filter(|line| !line.is_empty()).collect();
    assert_eq!(
        lines,
        vec!["|  |  |", "|---|---|", "| a | b |", "| c | d |"]
    );
}

#[test]
fn test_header_row_not_first_suppresses_blank_header() {
    let html = "<table>\
        <tr><td>x</td></tr>\
        <tr><th>H</th></tr>\
        </table>";
    assert_eq!(md(html), "\n| x |\n| H |\n|---|\n");
}

#[test]
fn test_pre_whitespace_preserved_but_collapsed_outside() {
    let irregular = "a  \t b\n\n\n   c";

    let inside = md(&format!("<pre>{irregular}</pre>"));
    assert_eq!(inside, format!("\n\n```\n{irregular}\n```\n\n"));

    let outside = md(&format!("<p>{irregular}</p>"));
    assert_eq!(outside, "\na b c\n");
}

#[test]
fn test_code_inside_paragraph_keeps_spaces() {
    assert_eq!(
        md("<p>Run <code>cargo  test</code> now</p>"),
        "\nRun `cargo  test` now\n"
    );
}

#[test]
fn test_entities_decoded_once() {
    assert_eq!(md("<p>a &amp;lt; b &lt; c</p>"), "\na &lt; b < c\n");
    assert_eq!(md("<span>a &amp;lt; b</span>"), "a &lt; b");
    assert_eq!(md("<custom-tag>&amp;amp;</custom-tag>"), "&amp;");
}

#[test]
fn test_article_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head>
    <title>Article</title>
    <style>body { margin: 0 }</style>
</head><body>
    <article>
        <h1>Main Title</h1>
        <p>An <em>important</em> paragraph with a <a href="/more">link</a>.</p>
        <h2>Details</h2>
        <ul>
            <li>First point</li>
            <li>Second point</li>
        </ul>
        <blockquote><p>Quoted text</p></blockquote>
        <script>track();</script>
    </article>
</body>
</html>"#;

    let expected = "\n# Main Title\n\
                    An _important_ paragraph with a [link](/more).\n\
                    ## Details\n\
                    \n\
                    - First point\n\
                    - Second point\n\
                    \n\
                    > Quoted text\n";
    assert_eq!(md(html), expected);
}

#[test]
fn test_nested_list_inside_ordered_list() {
    let html = r#"
        <ol>
            <li>Setup
                <ul>
                    <li>Install</li>
                    <li>Configure</li>
                </ul>
            </li>
            <li>Run</li>
        </ol>
    "#;
    assert_eq!(md(html), "\n\n1. Setup\n   - Install\n   - Configure\n2. Run\n\n");
}

#[test]
fn test_nested_blockquotes() {
    let html = "<blockquote>Level one<blockquote>Level two</blockquote></blockquote>";
    assert_eq!(md(html), "\n> Level one\n>> Level two\n");
}

#[test]
fn test_unknown_tags_pass_through() {
    assert_eq!(md("<custom-widget>inner</custom-widget>"), "inner");
    assert_eq!(md("<p><abbr>HTML</abbr> rocks</p>"), "\nHTML rocks\n");
}

#[test]
fn test_escaping_policy() {
    let html = "<p>Use *stars* and _underscores_</p>";
    assert_eq!(md(html), "\nUse *stars* and _underscores_\n");

    let escaped = MarkdownConverter::with_options(ConversionOptions {
        escape: EscapePolicy::Markdown,
        ..Default::default()
    })
    .convert_html(html)
    .expect("Failed to convert");
    assert_eq!(escaped, "\nUse \\*stars\\* and \\_underscores\\_\n");
}

#[test]
fn test_converter_is_reusable() {
    let converter = MarkdownConverter::new();
    for _ in 0..3 {
        assert_eq!(
            converter.convert_html("<h2>Again</h2>").expect("Failed to convert"),
            "\n## Again\n"
        );
    }
}
