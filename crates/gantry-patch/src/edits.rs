//! Structural edits built on the document primitives
//!
//! Each edit takes the current text and returns the new text. All of them are
//! idempotent and return the input unchanged when their anchor is missing.

use regex::Regex;
use tracing::debug;

use crate::document::{insert_lines, Anchor, Document};

/// Insert `statement` on the line after the first line containing `call`
pub fn insert_after_call(text: &str, call: &str, statement: &str) -> String {
    insert_lines(text, &Anchor::literal(call), 1, &[statement])
}

/// Insert `block` directly after the first line containing `declaration`,
/// unless the block is already in the text
pub fn insert_block_after(text: &str, declaration: &str, block: &str) -> String {
    let mut doc = Document::parse(text);
    if doc.contains(block) {
        return text.to_string();
    }
    let Some(index) = doc.find(&Anchor::literal(declaration)) else {
        debug!(declaration, "declaration not found, skipping block");
        return text.to_string();
    };
    doc.insert_at(index + 1, block);
    doc.to_string()
}

/// Replace the first match of `pattern` with `replacement`, unless `marker`
/// shows the rewrite already happened
pub fn rewrite_once(text: &str, pattern: &Regex, replacement: &str, marker: &str) -> String {
    if text.contains(marker) {
        return text.to_string();
    }
    if !pattern.is_match(text) {
        debug!(pattern = pattern.as_str(), "rewrite pattern not found");
        return text.to_string();
    }
    pattern.replace(text, replacement).into_owned()
}

/// Replace the first occurrence of `from` with `to`
pub fn replace_literal(text: &str, from: &str, to: &str) -> String {
    text.replacen(from, to, 1)
}

/// Insert `line` directly before the first line containing `marker`, unless
/// `guard` matches somewhere in the text
pub fn insert_before_unless(text: &str, guard: &Regex, marker: &str, line: &str) -> String {
    if guard.is_match(text) {
        return text.to_string();
    }
    insert_lines(text, &Anchor::literal(marker), 0, &[line])
}
