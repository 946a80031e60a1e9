//! PARIS timing: every duration is a whole multiple of one unit,
//! and one unit lasts `1200 / WPM` milliseconds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MorseError, MorseResult};

/// Milliseconds in one unit at 1 WPM.
pub const UNIT_MS_AT_1_WPM: f64 = 1200.0;

const UNIT_NANOS_AT_1_WPM: u64 = 1_200_000_000;

/// Unit lengths at a given rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    wpm: u32,
    unit_ms: f64,
    /// Integer unit length so that multiples add up exactly.
    unit_nanos: u64,
}

impl Timing {
    pub fn from_wpm(wpm: u32) -> MorseResult<Self> {
        validate_wpm(wpm)?;
        Ok(Timing {
            wpm,
            unit_ms: UNIT_MS_AT_1_WPM / wpm as f64,
            unit_nanos: UNIT_NANOS_AT_1_WPM / wpm as u64,
        })
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    /// One unit in milliseconds (60 ms at 20 WPM).
    pub fn unit_ms(&self) -> f64 {
        self.unit_ms
    }

    pub fn units(&self, n: u32) -> Duration {
        Duration::from_nanos(self.unit_nanos * n as u64)
    }

    /// Dot tone length (1 unit).
    pub fn dot(&self) -> Duration {
        self.units(1)
    }

    /// Dash tone length (3 units).
    pub fn dash(&self) -> Duration {
        self.units(3)
    }

    /// Silence after every dot or dash (1 unit).
    pub fn element_gap(&self) -> Duration {
        self.units(1)
    }

    /// Extra silence for a character gap; with the element gap: 3 units.
    pub fn char_gap(&self) -> Duration {
        self.units(2)
    }

    /// Extra silence for a word separator; with the element gap: 7 units.
    pub fn word_gap(&self) -> Duration {
        self.units(6)
    }
}

/// Reject a zero rate. There is no upper bound.
pub fn validate_wpm(wpm: u32) -> MorseResult<u32> {
    if wpm == 0 {
        return Err(MorseError::InvalidWpm { value: wpm });
    }
    Ok(wpm)
}

/// Parse user-entered rate text such as `"20"`.
pub fn parse_wpm(text: &str) -> MorseResult<u32> {
    let wpm = text
        .trim()
        .parse::<u32>()
        .map_err(|_| MorseError::ParseWpm {
            text: text.to_string(),
        })?;
    validate_wpm(wpm)
}
