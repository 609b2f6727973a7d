//! Block model shared by every format
//!
//! A [`Document`] is a flat, ordered list of [`Block`]s. It only lives for the duration of a
//! conversion; the backend stores markup, never this structure.

/// Heading depth. Report content never goes deeper than three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level (1..=3)
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Markup tag name for this level
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

/// One rendered unit of report content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Paragraph { text: String },
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } => text,
        }
    }

    /// Heading level, or `None` for paragraphs
    pub fn level(&self) -> Option<HeadingLevel> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            Block::Paragraph { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
