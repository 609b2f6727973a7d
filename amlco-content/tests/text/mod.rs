//! Text format tests
//!
//! Editor text → markup, driven through the public conversion functions.

mod export;
