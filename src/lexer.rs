use crate::token::{Element, Span, Spanned};

/// Splits a Morse string into per-character elements with byte spans.
///
/// Nothing is skipped here: characters without timing meaning come out as
/// [`Element::Other`] so the sequencer can still observe cancellation
/// between them.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input }
    }

    pub fn tokenize(&self) -> Vec<Spanned> {
        self.input
            .char_indices()
            .map(|(start, ch)| Spanned {
                element: Element::from_char(ch),
                span: Span {
                    start,
                    end: start + ch.len_utf8(),
                },
            })
            .collect()
    }

    /// `true` if the input contains at least one dot or dash.
    pub fn has_keyed_elements(&self) -> bool {
        self.input.chars().any(|c| c == '.' || c == '-')
    }
}
