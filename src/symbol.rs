//! The fixed character ↔ pattern table.
//!
//! Patterns are strings over `.` and `-`; the space character maps to the
//! word separator `/`. The table is built once and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Pattern emitted for the space character.
pub const WORD_SEPARATOR: &str = "/";

/// Character → pattern, in reference order.
const ENTRIES: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    (' ', WORD_SEPARATOR),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..-..-"),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

/// Bidirectional lookup over [`ENTRIES`].
#[derive(Debug)]
pub struct SymbolTable {
    forward: HashMap<char, &'static str>,
    reverse: HashMap<&'static str, char>,
}

static TABLE: LazyLock<SymbolTable> = LazyLock::new(SymbolTable::build);

impl SymbolTable {
    fn build() -> Self {
        let mut forward = HashMap::with_capacity(ENTRIES.len());
        let mut reverse = HashMap::with_capacity(ENTRIES.len());
        for &(ch, pattern) in ENTRIES {
            forward.insert(ch, pattern);
            reverse.insert(pattern, ch);
        }
        SymbolTable { forward, reverse }
    }

    /// The process-wide table.
    pub fn global() -> &'static SymbolTable {
        &TABLE
    }

    /// Pattern for an (already uppercased) character.
    pub fn lookup_char(&self, ch: char) -> Option<&'static str> {
        self.forward.get(&ch).copied()
    }

    /// Character for a pattern; `/` resolves to a space.
    pub fn lookup_pattern(&self, pattern: &str) -> Option<char> {
        self.reverse.get(pattern).copied()
    }

    /// All entries in reference order, including the word separator.
    pub fn entries(&self) -> impl Iterator<Item = (char, &'static str)> + '_ {
        ENTRIES.iter().copied()
    }

    /// Entries meant for a user-facing reference chart (no word separator).
    pub fn dictionary(&self) -> Vec<(char, &'static str)> {
        self.entries().filter(|&(ch, _)| ch != ' ').collect()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// `true` for a non-empty string made only of dots and dashes.
pub fn is_element_pattern(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == '.' || c == '-')
}
