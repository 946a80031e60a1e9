//! Drives a compiled [`Schedule`] against the outside world.
//!
//! The sequencer owns no timers and no output devices. It calls a
//! [`SignalEmitter`], a [`ToneEmitter`] and a [`Clock`], and checks the
//! session's cancel flag before every token.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::MorseResult;
use crate::schedule::{Action, Schedule};
use crate::session::PlaybackSession;

/// Visual indicator (lamp, screen flash, LED). Must be idempotent.
pub trait SignalEmitter {
    fn set_signal(&self, on: bool);
}

/// Audible output. `play_tone` schedules a pulse and returns at once.
pub trait ToneEmitter {
    fn play_tone(&self, frequency_hz: f64, duration: Duration) -> MorseResult<()>;

    /// Cut any pulse that is still sounding.
    fn silence(&self) {}
}

/// Timed suspension.
pub trait Clock {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()>;
}

impl<T: SignalEmitter + ?Sized> SignalEmitter for &T {
    fn set_signal(&self, on: bool) {
        (**self).set_signal(on)
    }
}

impl<T: ToneEmitter + ?Sized> ToneEmitter for &T {
    fn play_tone(&self, frequency_hz: f64, duration: Duration) -> MorseResult<()> {
        (**self).play_tone(frequency_hz, duration)
    }

    fn silence(&self) {
        (**self).silence()
    }
}

impl<T: Clock> Clock for &T {
    fn wait(&self, duration: Duration) -> impl Future<Output = ()> {
        (**self).wait(duration)
    }
}

/// A tone emitter that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTone;

impl ToneEmitter for NoTone {
    fn play_tone(&self, _frequency_hz: f64, _duration: Duration) -> MorseResult<()> {
        Ok(())
    }
}

/// How a single pass over the schedule ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    Completed,
    Cancelled,
}

impl SequenceOutcome {
    pub fn is_completed(self) -> bool {
        self == SequenceOutcome::Completed
    }
}

pub struct Sequencer<'a, S, T, C> {
    signal: &'a S,
    tone: &'a T,
    clock: &'a C,
    frequency_hz: f64,
}

impl<'a, S, T, C> Sequencer<'a, S, T, C>
where
    S: SignalEmitter,
    T: ToneEmitter,
    C: Clock,
{
    pub fn new(signal: &'a S, tone: &'a T, clock: &'a C, frequency_hz: f64) -> Self {
        Sequencer {
            signal,
            tone,
            clock,
            frequency_hz,
        }
    }

    /// Play the schedule once, left to right.
    ///
    /// Mute is sampled at each tone, so toggling it affects the next pulse
    /// only. A cancel request is honoured before the next token; the pulse
    /// in flight finishes its current wait.
    pub async fn run(&self, schedule: &Schedule, session: &PlaybackSession) -> SequenceOutcome {
        for (index, token) in schedule.tokens.iter().enumerate() {
            if session.is_cancelled() {
                debug!(index, "sequence cancelled");
                return SequenceOutcome::Cancelled;
            }
            for action in &token.actions {
                match *action {
                    Action::Signal(on) => self.signal.set_signal(on),
                    Action::Tone(duration) => self.emit_tone(duration, session),
                    Action::Wait(duration) => self.clock.wait(duration).await,
                }
            }
        }

        if session.is_cancelled() {
            SequenceOutcome::Cancelled
        } else {
            SequenceOutcome::Completed
        }
    }

    fn emit_tone(&self, duration: Duration, session: &PlaybackSession) {
        if session.is_muted() {
            return;
        }
        if let Err(e) = self.tone.play_tone(self.frequency_hz, duration) {
            warn!(error = %e, "tone emitter failed; continuing with signal only");
        }
    }
}
