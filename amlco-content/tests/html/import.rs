//! Import tests for report markup (markup → editor text)

use amlco_content::format::Format;
use amlco_content::formats::html::HtmlFormat;
use amlco_content::{html_to_text, Block};

#[test]
fn test_empty_markup_is_empty_text() {
    assert_eq!(html_to_text(""), "");
    assert_eq!(html_to_text("   \n "), "");
}

#[test]
fn test_empty_container_is_empty_text() {
    assert_eq!(html_to_text("<div></div>"), "");
}

#[test]
fn test_single_paragraph_is_trimmed() {
    assert_eq!(html_to_text("<p>   Hello world   </p>"), "Hello world");
}

#[test]
fn test_heading_markers_are_not_reintroduced() {
    let text = html_to_text("<div><h1>Title</h1><h3>Sub</h3><p>Body</p></div>");
    assert_eq!(text, "Title\nSub\nBody");
    assert!(!text.contains('#'));
}

#[test]
fn test_backend_document_with_wrapper_markup() {
    let html = r#"<!DOCTYPE html>
<html>
  <head><meta charset="utf-8"><title>AMLCO Annual Report</title></head>
  <body>
    <div class="report">
      <h2>1. Introduction</h2>
      <p>The Company is licensed as an
         Administrative Service Provider.</p>
      <ul><li>First point</li><li>Second point</li></ul>
    </div>
  </body>
</html>"#;
    assert_eq!(
        html_to_text(html),
        "1. Introduction\n\
         The Company is licensed as an Administrative Service Provider.\n\
         First point\n\
         Second point"
    );
}

#[test]
fn test_malformed_markup_is_tolerated() {
    assert_eq!(
        html_to_text("<div><p>Unclosed paragraph<p>Next</div>"),
        "Unclosed paragraph\nNext"
    );
}

#[test]
fn test_html_format_parse_yields_paragraphs_only() {
    let doc = HtmlFormat::default()
        .parse("<div><h2>Scope</h2><p>Body</p></div>")
        .unwrap();
    assert_eq!(
        doc.blocks,
        vec![Block::paragraph("Scope"), Block::paragraph("Body")]
    );
}
