//! Playback controller: owns the session and the output devices, and runs
//! at most one sequence at a time.

use tracing::{debug, info};

use crate::config::PlaybackConfig;
use crate::error::MorseResult;
use crate::lexer::Lexer;
use crate::schedule::compile_tokens;
use crate::sequencer::{Clock, SequenceOutcome, Sequencer, SignalEmitter, ToneEmitter};
use crate::session::PlaybackSession;

/// Result of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The input had no dot or dash; nothing was started.
    NothingToPlay,
    /// Another sequence was already running; this request was ignored.
    AlreadyPlaying,
    /// Ran to the end (loop mode off or switched off).
    Finished { iterations: u32 },
    /// Ended by [`Player::stop`].
    Stopped { iterations: u32 },
}

pub struct Player<S, T, C> {
    session: PlaybackSession,
    signal: S,
    tone: T,
    clock: C,
    config: PlaybackConfig,
}

impl<S, T, C> Player<S, T, C>
where
    S: SignalEmitter,
    T: ToneEmitter,
    C: Clock,
{
    pub fn new(signal: S, tone: T, clock: C, config: PlaybackConfig) -> MorseResult<Self> {
        config.validate()?;
        let session = PlaybackSession::new(config.wpm)?;
        Ok(Player {
            session,
            signal,
            tone,
            clock,
            config,
        })
    }

    /// Handle for toggling loop/mute/rate from elsewhere.
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn signal(&self) -> &S {
        &self.signal
    }

    pub fn tone(&self) -> &T {
        &self.tone
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn set_wpm(&self, wpm: u32) -> MorseResult<()> {
        self.session.set_wpm(wpm)
    }

    pub fn toggle_loop(&self) -> bool {
        let enabled = self.session.toggle_loop();
        info!(enabled, "loop mode");
        enabled
    }

    pub fn toggle_mute(&self) -> bool {
        let muted = self.session.toggle_mute();
        info!(muted, "mute");
        muted
    }

    /// Play a Morse string until it ends, loops run out, or [`stop`] is
    /// called.
    ///
    /// The rate is read again at the start of every repetition.
    ///
    /// [`stop`]: Player::stop
    pub async fn play(&self, morse: &str) -> PlayOutcome {
        if self.session.is_playing() {
            debug!("play request ignored: already playing");
            return PlayOutcome::AlreadyPlaying;
        }
        let morse = morse.trim();
        let lexer = Lexer::new(morse);
        if !lexer.has_keyed_elements() {
            info!("nothing to play");
            return PlayOutcome::NothingToPlay;
        }
        if !self.session.try_begin() {
            debug!("play request ignored: already playing");
            return PlayOutcome::AlreadyPlaying;
        }

        let tokens = lexer.tokenize();
        let sequencer = Sequencer::new(
            &self.signal,
            &self.tone,
            &self.clock,
            self.config.frequency_hz,
        );
        info!(chars = tokens.len(), wpm = self.session.wpm(), "playback started");

        let mut iterations = 0;
        loop {
            // validated on every write
            let Ok(timing) = self.session.timing() else {
                break;
            };
            let schedule = compile_tokens(&tokens, timing);
            let outcome = sequencer.run(&schedule, &self.session).await;
            if outcome == SequenceOutcome::Completed {
                iterations += 1;
            }
            if self.session.is_cancelled() {
                break;
            }
            if self.session.loop_enabled() && outcome.is_completed() {
                debug!(iterations, pause_ms = self.config.loop_pause_ms, "loop pause");
                self.clock.wait(self.config.loop_pause()).await;
            }
            if !self.session.loop_enabled() || self.session.is_cancelled() {
                break;
            }
            debug!(iterations, "restarting sequence");
        }

        let stopped = self.session.is_cancelled();
        self.session.finish();
        self.signal.set_signal(false);

        if stopped {
            info!(iterations, "playback stopped");
            PlayOutcome::Stopped { iterations }
        } else {
            info!(iterations, "playback finished");
            PlayOutcome::Finished { iterations }
        }
    }

    /// Ask the running sequence to stop and silence the outputs right away.
    /// Returns `false` when nothing was playing.
    pub fn stop(&self) -> bool {
        if !self.session.is_playing() {
            return false;
        }
        self.session.request_cancel();
        self.tone.silence();
        self.signal.set_signal(false);
        info!("stop requested");
        true
    }
}
