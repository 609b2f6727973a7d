//! HTML serialization (Document → markup fragment)

use super::HtmlOptions;
use crate::document::{Block, Document};

/// Render a document as `<div>` wrapping one tag per block.
pub fn render_document(doc: &Document, options: &HtmlOptions) -> String {
    let mut out = String::from("<div>");
    for block in &doc.blocks {
        push_block(&mut out, block, options);
    }
    out.push_str("</div>");
    out
}

fn push_block(out: &mut String, block: &Block, options: &HtmlOptions) {
    let tag = match block {
        Block::Heading { level, .. } => level.tag(),
        Block::Paragraph { .. } => "p",
    };
    out.push('<');
    out.push_str(tag);
    out.push('>');
    if options.escape_text {
        out.push_str(&html_escape(block.text()));
    } else {
        out.push_str(block.text());
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
