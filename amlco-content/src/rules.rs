//! Line classification for editor text
//!
//! Each non-blank line becomes exactly one [`Block`]. The rules below are tried in table order
//! and the first one that accepts the (trimmed) line wins, so the table order is part of the
//! observable behavior:
//!
//! | # | Rule            | Accepts                                         | Produces              |
//! |---|-----------------|-------------------------------------------------|-----------------------|
//! | 1 | `h3-prefix`     | starts with `"### "`                            | H3, prefix stripped   |
//! | 2 | `h2-prefix`     | starts with `"## "`                             | H2, prefix stripped   |
//! | 3 | `h1-prefix`     | starts with `"# "`                              | H1, prefix stripped   |
//! | 4 | `all-caps`      | >= 4 ASCII letters, none lower-case             | H2, full line         |
//! | 5 | `outline-number`| `1`, `1.2`, `3.2.1` ... followed by whitespace  | H2, full line         |
//! | 6 | `paragraph`     | anything                                        | paragraph, full line  |
//!
//! Rules 4 and 5 misfire on short acronym lines and sentences that open with a version number.
//! Their thresholds are kept exactly as they are; changing them changes how saved reports render.

use crate::document::{Block, HeadingLevel};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of letters before a line counts as an all-caps heading.
pub const MIN_CAPS_LETTERS: usize = 4;

static OUTLINE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*\s+").expect("outline pattern is valid"));

/// A named predicate -> constructor pair. `apply` receives an already trimmed, non-empty line.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<Block>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "h3-prefix",
        apply: h3_prefix,
    },
    Rule {
        name: "h2-prefix",
        apply: h2_prefix,
    },
    Rule {
        name: "h1-prefix",
        apply: h1_prefix,
    },
    Rule {
        name: "all-caps",
        apply: all_caps,
    },
    Rule {
        name: "outline-number",
        apply: outline_number,
    },
    Rule {
        name: "paragraph",
        apply: paragraph,
    },
];

/// Classify one raw line. Returns `None` for blank lines.
pub fn classify_line(raw: &str) -> Option<Block> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }
    RULES.iter().find_map(|rule| (rule.apply)(line))
}

/// Name of the rule that claims `raw`, if any.
pub fn matching_rule(raw: &str) -> Option<&'static str> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }
    RULES
        .iter()
        .find(|rule| (rule.apply)(line).is_some())
        .map(|rule| rule.name)
}

fn strip_marker(line: &str, marker: &str, level: HeadingLevel) -> Option<Block> {
    line.strip_prefix(marker)
        .map(|rest| Block::heading(level, rest.trim()))
}

pub fn h3_prefix(line: &str) -> Option<Block> {
    strip_marker(line, "### ", HeadingLevel::H3)
}

pub fn h2_prefix(line: &str) -> Option<Block> {
    strip_marker(line, "## ", HeadingLevel::H2)
}

pub fn h1_prefix(line: &str) -> Option<Block> {
    strip_marker(line, "# ", HeadingLevel::H1)
}

/// Only ASCII letters are counted; accented capitals do not make a line "all caps".
pub fn is_all_caps(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    letters.len() >= MIN_CAPS_LETTERS && letters.iter().all(|c| c.is_ascii_uppercase())
}

pub fn all_caps(line: &str) -> Option<Block> {
    is_all_caps(line).then(|| Block::heading(HeadingLevel::H2, line))
}

pub fn is_outline_number(line: &str) -> bool {
    OUTLINE_NUMBER.is_match(line)
}

pub fn outline_number(line: &str) -> Option<Block> {
    is_outline_number(line).then(|| Block::heading(HeadingLevel::H2, line))
}

pub fn paragraph(line: &str) -> Option<Block> {
    Some(Block::paragraph(line))
}
