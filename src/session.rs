//! Playback session state shared between the running sequence and the
//! controls (stop, loop, mute, rate).
//!
//! All fields are single-word atomics written by plain stores, so toggling
//! from a UI callback never waits on the sequence.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::error::MorseResult;
use crate::timing::{Timing, validate_wpm};

#[derive(Debug)]
struct Flags {
    playing: AtomicBool,
    cancel: AtomicBool,
    looping: AtomicBool,
    muted: AtomicBool,
    wpm: AtomicU32,
}

/// Cheap-to-clone handle on one playback session.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    flags: Arc<Flags>,
}

impl PlaybackSession {
    pub fn new(wpm: u32) -> MorseResult<Self> {
        validate_wpm(wpm)?;
        Ok(PlaybackSession {
            flags: Arc::new(Flags {
                playing: AtomicBool::new(false),
                cancel: AtomicBool::new(false),
                looping: AtomicBool::new(false),
                muted: AtomicBool::new(false),
                wpm: AtomicU32::new(wpm),
            }),
        })
    }

    pub fn wpm(&self) -> u32 {
        self.flags.wpm.load(Ordering::Acquire)
    }

    pub fn set_wpm(&self, wpm: u32) -> MorseResult<()> {
        self.flags.wpm.store(validate_wpm(wpm)?, Ordering::Release);
        Ok(())
    }

    /// Timing for the current rate.
    pub fn timing(&self) -> MorseResult<Timing> {
        Timing::from_wpm(self.wpm())
    }

    pub fn is_playing(&self) -> bool {
        self.flags.playing.load(Ordering::Acquire)
    }

    /// Move Idle → Playing. Returns `false` if a sequence already owns the
    /// session.
    pub fn try_begin(&self) -> bool {
        let claimed = self
            .flags
            .playing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if claimed {
            self.flags.cancel.store(false, Ordering::Release);
        }
        claimed
    }

    /// Back to Idle; clears any pending cancellation.
    pub fn finish(&self) {
        self.flags.cancel.store(false, Ordering::Release);
        self.flags.playing.store(false, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flags.cancel.load(Ordering::Acquire)
    }

    pub fn request_cancel(&self) {
        self.flags.cancel.store(true, Ordering::Release);
    }

    pub fn loop_enabled(&self) -> bool {
        self.flags.looping.load(Ordering::Acquire)
    }

    pub fn set_loop(&self, enabled: bool) {
        self.flags.looping.store(enabled, Ordering::Release);
    }

    /// Flip loop mode, returning the new value.
    pub fn toggle_loop(&self) -> bool {
        !self.flags.looping.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_muted(&self) -> bool {
        self.flags.muted.load(Ordering::Acquire)
    }

    pub fn set_muted(&self, muted: bool) {
        self.flags.muted.store(muted, Ordering::Release);
    }

    /// Flip mute, returning the new value.
    pub fn toggle_mute(&self) -> bool {
        !self.flags.muted.fetch_xor(true, Ordering::AcqRel)
    }
}
