//! Playback and rendering settings.
//!
//! Stored as JSON (camelCase keys). Every field is optional in the file and
//! falls back to the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MorseError, MorseResult};
use crate::timing::{Timing, validate_wpm};

pub const DEFAULT_WPM: u32 = 20;
pub const DEFAULT_FREQUENCY_HZ: f64 = 600.0;
pub const DEFAULT_LOOP_PAUSE_MS: u64 = 3000;
pub const DEFAULT_RAMP_MS: f64 = 10.0;
pub const DEFAULT_AMPLITUDE: f64 = 0.15;
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackConfig {
    /// Initial rate in words per minute.
    pub wpm: u32,
    /// Carrier frequency of the tone.
    pub frequency_hz: f64,
    /// Pause between loop repetitions.
    pub loop_pause_ms: u64,
    /// Linear fade in / fade out length of every pulse.
    pub ramp_ms: f64,
    /// Peak gain of the tone [0, 1].
    pub amplitude: f64,
    /// Sample rate for offline rendering.
    pub sample_rate: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            wpm: DEFAULT_WPM,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            loop_pause_ms: DEFAULT_LOOP_PAUSE_MS,
            ramp_ms: DEFAULT_RAMP_MS,
            amplitude: DEFAULT_AMPLITUDE,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl PlaybackConfig {
    pub fn from_json_str(json: &str) -> MorseResult<Self> {
        let config: PlaybackConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> MorseResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> MorseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> MorseResult<()> {
        validate_wpm(self.wpm)?;
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(MorseError::ConfigValue {
                name: "frequencyHz",
                message: format!("{} is not a positive frequency", self.frequency_hz),
            });
        }
        if !(self.ramp_ms.is_finite() && self.ramp_ms >= 0.0) {
            return Err(MorseError::ConfigValue {
                name: "rampMs",
                message: format!("{} must be zero or more", self.ramp_ms),
            });
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(MorseError::ConfigValue {
                name: "amplitude",
                message: format!("{} is outside [0, 1]", self.amplitude),
            });
        }
        if self.sample_rate == 0 {
            return Err(MorseError::ConfigValue {
                name: "sampleRate",
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn timing(&self) -> MorseResult<Timing> {
        Timing::from_wpm(self.wpm)
    }

    pub fn loop_pause(&self) -> Duration {
        Duration::from_millis(self.loop_pause_ms)
    }
}
