//! Text ↔ Morse conversion.
//!
//! Both directions are lossy but total: characters without a pattern are
//! dropped when encoding, unknown dot/dash groups decode to
//! [`UNKNOWN_MARKER`], and anything else is skipped.

use crate::error::{MorseError, MorseResult};
use crate::symbol::{SymbolTable, is_element_pattern};

/// Decoded in place of a dot/dash group that has no table entry.
pub const UNKNOWN_MARKER: &str = "[?]";

/// Translate text to a Morse string.
///
/// Letters are uppercased first. Each recognised character becomes its
/// pattern followed by a space (the space character itself becomes `/ `);
/// newlines are copied through untouched.
pub fn encode(text: &str) -> String {
    let table = SymbolTable::global();
    let mut out = String::with_capacity(text.len() * 5);
    for ch in text.chars().flat_map(char::to_uppercase) {
        if ch == '\n' {
            out.push('\n');
        } else if let Some(pattern) = table.lookup_char(ch) {
            out.push_str(pattern);
            out.push(' ');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Translate a Morse string back to (uppercase) text.
pub fn decode(morse: &str) -> String {
    let mut out = String::with_capacity(morse.len() / 2);
    for (_, token) in split_tokens(morse) {
        match classify(token) {
            Decoded::Char(ch) => out.push(ch),
            Decoded::Unknown => out.push_str(UNKNOWN_MARKER),
            Decoded::Malformed => {}
        }
    }
    out.trim().to_string()
}

/// Like [`decode`], but reports the first token that is neither a dot/dash
/// group nor a word separator instead of skipping it.
pub fn decode_strict(morse: &str) -> MorseResult<String> {
    let mut out = String::with_capacity(morse.len() / 2);
    for (offset, token) in split_tokens(morse) {
        match classify(token) {
            Decoded::Char(ch) => out.push(ch),
            Decoded::Unknown => out.push_str(UNKNOWN_MARKER),
            Decoded::Malformed => {
                return Err(MorseError::MalformedToken {
                    token: token.to_string(),
                    offset,
                });
            }
        }
    }
    Ok(out.trim().to_string())
}

enum Decoded {
    Char(char),
    Unknown,
    Malformed,
}

fn classify(token: &str) -> Decoded {
    if let Some(ch) = SymbolTable::global().lookup_pattern(token) {
        Decoded::Char(ch)
    } else if is_element_pattern(token) {
        Decoded::Unknown
    } else {
        Decoded::Malformed
    }
}

/// Split on runs of whitespace and `/`. Every `/` inside a run is kept as
/// its own token; whitespace only separates. Yields `(byte_offset, token)`.
fn split_tokens(morse: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, ch) in morse.char_indices() {
        if ch.is_whitespace() || ch == '/' {
            if let Some(s) = start.take() {
                tokens.push((s, &morse[s..i]));
            }
            if ch == '/' {
                tokens.push((i, &morse[i..i + 1]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push((s, &morse[s..]));
    }
    tokens
}
