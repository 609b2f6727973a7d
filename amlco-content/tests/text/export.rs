//! Export tests for editor text (text → markup)
//!
//! These tests check the block markup produced for each classification rule and for the
//! blank-line handling between them.

use amlco_content::format::Format;
use amlco_content::formats::text::TextFormat;
use amlco_content::{text_to_html, Block, HeadingLevel};
use insta::assert_snapshot;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

// ============================================================================
// BASIC BLOCKS
// ============================================================================

#[test]
fn test_empty_text_is_empty_container() {
    assert_eq!(text_to_html(""), "<div></div>");
}

#[test]
fn test_whitespace_only_text_is_empty_container() {
    assert_eq!(text_to_html("  \n\t\n   "), "<div></div>");
}

#[test]
fn test_plain_lines_are_paragraphs_in_order() {
    let html = text_to_html("First line\nSecond line\nThird line");
    assert_snapshot!(html, @"<div><p>First line</p><p>Second line</p><p>Third line</p></div>");
}

#[test]
fn test_prefixed_headings() {
    assert_eq!(text_to_html("### Title"), "<div><h3>Title</h3></div>");
    assert_eq!(text_to_html("## Title"), "<div><h2>Title</h2></div>");
    assert_eq!(text_to_html("# Title"), "<div><h1>Title</h1></div>");
}

#[test]
fn test_blank_lines_close_up() {
    assert_eq!(text_to_html("A\n\nB"), "<div><p>A</p><p>B</p></div>");
    assert_eq!(text_to_html("A\n   \n\n\nB\n"), "<div><p>A</p><p>B</p></div>");
}

#[test]
fn test_all_caps_line_is_h2() {
    assert_eq!(
        text_to_html("SECTION OVERVIEW"),
        "<div><h2>SECTION OVERVIEW</h2></div>"
    );
}

#[test]
fn test_short_caps_line_stays_paragraph() {
    assert_eq!(text_to_html("KYC"), "<div><p>KYC</p></div>");
}

#[test]
fn test_outline_number_is_h2() {
    assert_eq!(
        text_to_html("3.2 Risk Assessment"),
        "<div><h2>3.2 Risk Assessment</h2></div>"
    );
}

#[test]
fn test_lines_are_trimmed() {
    assert_eq!(
        text_to_html("   indented text   "),
        "<div><p>indented text</p></div>"
    );
}

#[test]
fn test_markup_characters_pass_through() {
    assert_eq!(text_to_html("a < b & c"), "<div><p>a < b & c</p></div>");
}

// ============================================================================
// DOCUMENT MODEL
// ============================================================================

#[test]
fn test_parse_produces_one_block_per_line() {
    let doc = TextFormat.parse("One\nTwo\n\nThree").unwrap();
    assert_eq!(
        doc.blocks,
        vec![
            Block::paragraph("One"),
            Block::paragraph("Two"),
            Block::paragraph("Three")
        ]
    );
}

#[test]
fn test_heading_block_text_is_stripped() {
    let doc = TextFormat.parse("###    Spaced title   ").unwrap();
    assert_eq!(
        doc.blocks,
        vec![Block::heading(HeadingLevel::H3, "Spaced title")]
    );
}

// ============================================================================
// FIXTURE
// ============================================================================

#[test]
fn test_annual_report_fixture() {
    let html = text_to_html(&fixture("annual-report.txt"));
    assert_eq!(
        html,
        "<div>\
         <h1>AMLCO Annual Report 2025</h1>\
         <h2>EXECUTIVE SUMMARY</h2>\
         <p>The Company continued to apply a risk-based approach during the year.</p>\
         <h2>1 Introduction</h2>\
         <p>This report is submitted to the Board of Directors.</p>\
         <h2>1.1 Scope</h2>\
         <p>Covers the period from 1 January to 31 December 2025.</p>\
         <h2>Client Risk Profile</h2>\
         <h3>High Risk Clients</h3>\
         <p>Twelve clients were classified as high risk.</p>\
         </div>"
    );
}
