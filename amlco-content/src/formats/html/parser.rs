//! HTML import (markup → visible text)
//!
//! Pipeline: HTML string → RcDom → visible lines → Document of paragraphs
//!
//! The walk approximates what a browser shows for the markup: block-level elements start and
//! end a line, `<br>` forces a break, whitespace runs collapse to one space, and non-rendered
//! subtrees (`<head>`, `<script>`, ...) contribute nothing. Empty lines are never emitted.

use crate::document::{Block, Document};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "tfoot",
    "thead",
    "tr",
    "ul",
];

const SKIPPED_ELEMENTS: &[&str] = &["head", "noscript", "script", "style", "template", "title"];

const CELL_ELEMENTS: &[&str] = &["td", "th"];

/// Parse markup into one paragraph per visible line.
pub fn parse_html(source: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);

    let mut extractor = TextExtractor::default();
    extractor.walk(&dom.document, false);
    extractor.break_line();

    log::debug!("extracted {} visible lines from markup", extractor.lines.len());
    Document::with_blocks(extractor.lines.into_iter().map(Block::paragraph).collect())
}

#[derive(Default)]
struct TextExtractor {
    lines: Vec<String>,
    current: String,
}

impl TextExtractor {
    fn walk(&mut self, handle: &Handle, preformatted: bool) {
        match &handle.data {
            NodeData::Document => self.walk_children(handle, preformatted),
            NodeData::Element { name, .. } => {
                let tag: &str = &name.local;
                if SKIPPED_ELEMENTS.contains(&tag) {
                    return;
                }
                if tag == "br" {
                    self.break_line();
                    return;
                }
                if CELL_ELEMENTS.contains(&tag) {
                    self.separate();
                }

                let is_block = BLOCK_ELEMENTS.contains(&tag);
                if is_block {
                    self.break_line();
                }
                self.walk_children(handle, preformatted || tag == "pre");
                if is_block {
                    self.break_line();
                }
            }
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                if preformatted {
                    self.push_preformatted(&contents);
                } else {
                    self.push_collapsed(&contents);
                }
            }
            _ => {}
        }
    }

    fn walk_children(&mut self, handle: &Handle, preformatted: bool) {
        for child in handle.children.borrow().iter() {
            self.walk(child, preformatted);
        }
    }

    fn push_collapsed(&mut self, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                self.separate();
            } else {
                self.current.push(c);
            }
        }
    }

    fn push_preformatted(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.break_line();
            } else {
                self.current.push(c);
            }
        }
    }

    /// Single space between words, never at the start of a line.
    fn separate(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }

    fn break_line(&mut self) {
        let line = self.current.trim();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
        self.current.clear();
    }
}
