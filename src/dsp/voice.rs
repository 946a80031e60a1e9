//! Voice: one keyed pulse, carrier × ramp envelope × amplitude.

use crate::config::PlaybackConfig;

use super::envelope::RampEnvelope;
use super::oscillator::Oscillator;

#[derive(Debug, Clone)]
pub struct Voice {
    pub oscillator: Oscillator,
    pub envelope: RampEnvelope,
    /// Peak gain [0, 1].
    pub amplitude: f64,
}

impl Voice {
    pub fn new(sample_rate: f64, config: &PlaybackConfig) -> Self {
        Voice {
            oscillator: Oscillator::new(config.frequency_hz, sample_rate),
            envelope: RampEnvelope::new(sample_rate, config.ramp_ms / 1000.0),
            amplitude: config.amplitude,
        }
    }

    /// Start a pulse of `samples` length.
    pub fn key_down(&mut self, samples: usize) {
        self.oscillator.reset();
        self.envelope.trigger(samples);
    }

    pub fn next_sample(&mut self) -> f64 {
        if self.envelope.is_finished() {
            return 0.0;
        }
        let env = self.envelope.next_sample();
        self.oscillator.next_sample() * env * self.amplitude
    }

    pub fn is_finished(&self) -> bool {
        self.envelope.is_finished()
    }
}
