//! Format implementations
//!
//! This module contains the format implementations that convert between the block
//! [`Document`](crate::Document) and a text representation.

pub mod html;
pub mod text;

pub use html::{HtmlFormat, HtmlOptions};
pub use text::TextFormat;
