//! Anchors module - Find and check anchor ids in AsciiDoc documents
//!
//! Anchors are block ids declared at the start of a line, optionally followed
//! by a section header that gives them a title.
//! Format: [[id]]

pub mod lint;
pub mod parse;
