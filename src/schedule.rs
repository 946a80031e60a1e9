use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lexer::Lexer;
use crate::timing::Timing;
use crate::token::{Element, Span, Spanned};

// ── Schedule (Compiler Output) ──────────────────────────────

/// A single side effect or pause, executed in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Turn the visual signal on or off.
    Signal(bool),
    /// Start a tone of the given length. Does not advance time by itself.
    Tone(Duration),
    /// Suspend for the given length.
    Wait(Duration),
}

/// The actions produced by one character of the Morse string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledToken {
    pub element: Element,
    /// Source byte range (for highlighting the element being played).
    pub span: Span,
    pub actions: Vec<Action>,
}

/// A whole Morse string compiled against one rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub timing: Timing,
    pub tokens: Vec<ScheduledToken>,
    /// Sum of all waits.
    pub total: Duration,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tone pulses (dots and dashes).
    pub fn pulse_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.element.is_keyed()).count()
    }
}

// ── Compiler ────────────────────────────────────────────────

/// Actions for one element.
pub fn element_actions(element: Element, timing: &Timing) -> Vec<Action> {
    match element {
        Element::Dot | Element::Dash => {
            let length = if element == Element::Dot {
                timing.dot()
            } else {
                timing.dash()
            };
            vec![
                Action::Signal(true),
                Action::Tone(length),
                Action::Wait(length),
                Action::Signal(false),
                Action::Wait(timing.element_gap()),
            ]
        }
        Element::CharGap => vec![Action::Wait(timing.char_gap())],
        Element::WordGap => vec![Action::Wait(timing.word_gap())],
        Element::Newline | Element::Other(_) => Vec::new(),
    }
}

/// Compile lexed tokens into a schedule.
pub fn compile_tokens(tokens: &[Spanned], timing: Timing) -> Schedule {
    let mut total = Duration::ZERO;
    let tokens = tokens
        .iter()
        .map(|spanned| {
            let actions = element_actions(spanned.element, &timing);
            total += actions
                .iter()
                .map(|action| match action {
                    Action::Wait(d) => *d,
                    _ => Duration::ZERO,
                })
                .sum::<Duration>();
            ScheduledToken {
                element: spanned.element,
                span: spanned.span,
                actions,
            }
        })
        .collect();

    Schedule {
        timing,
        tokens,
        total,
    }
}

/// Lex and compile a Morse string.
pub fn compile(morse: &str, timing: Timing) -> Schedule {
    compile_tokens(&Lexer::new(morse).tokenize(), timing)
}
