use serde::{Deserialize, Serialize};

/// One character of a Morse string, as seen by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Dot,        // .
    Dash,       // -
    CharGap,    // ' '
    WordGap,    // /
    Newline,    // \n
    Other(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub element: Element,
    pub span: Span,
}

impl Element {
    pub fn from_char(ch: char) -> Self {
        match ch {
            '.' => Element::Dot,
            '-' => Element::Dash,
            ' ' => Element::CharGap,
            '/' => Element::WordGap,
            '\n' => Element::Newline,
            other => Element::Other(other),
        }
    }

    /// Dots and dashes are the only keyed elements.
    pub fn is_keyed(self) -> bool {
        matches!(self, Element::Dot | Element::Dash)
    }
}

/// Convert an element back to its source character.
pub fn element_to_char(element: Element) -> char {
    match element {
        Element::Dot => '.',
        Element::Dash => '-',
        Element::CharGap => ' ',
        Element::WordGap => '/',
        Element::Newline => '\n',
        Element::Other(ch) => ch,
    }
}
