//! HTML format tests
//!
//! Report markup → editor text.

mod import;
