//! Linear fade-in / fade-out envelope for a fixed-length pulse.
//!
//! The pulse keeps its full length; the ramps sit inside it. When the pulse
//! is shorter than two ramps, each ramp is shortened to half the pulse.

/// Envelope stages.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Idle,
    Attack,
    Hold,
    Release,
}

#[derive(Debug, Clone)]
pub struct RampEnvelope {
    /// Ramp time in seconds (each side).
    pub ramp: f64,

    stage: Stage,
    sample_rate: f64,
    ramp_samples: usize,
    total_samples: usize,
    counter: usize,
}

impl RampEnvelope {
    pub fn new(sample_rate: f64, ramp: f64) -> Self {
        RampEnvelope {
            ramp,
            stage: Stage::Idle,
            sample_rate,
            ramp_samples: 0,
            total_samples: 0,
            counter: 0,
        }
    }

    /// Start a pulse lasting `total_samples`.
    pub fn trigger(&mut self, total_samples: usize) {
        let wanted = (self.ramp * self.sample_rate).round() as usize;
        self.ramp_samples = wanted.min(total_samples / 2);
        self.total_samples = total_samples;
        self.counter = 0;
        self.stage = self.stage_at(0);
    }

    /// Next gain value in [0, 1].
    pub fn next_sample(&mut self) -> f64 {
        let i = self.counter;
        let gain = match self.stage {
            Stage::Idle => return 0.0,
            Stage::Attack => i as f64 / self.ramp_samples as f64,
            Stage::Hold => 1.0,
            Stage::Release => (self.total_samples - i) as f64 / self.ramp_samples as f64,
        };
        self.counter += 1;
        self.stage = self.stage_at(self.counter);
        gain
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Idle
    }

    /// Stage for sample index `i` of the current pulse. Attack and Release
    /// are only reachable with a non-zero ramp.
    fn stage_at(&self, i: usize) -> Stage {
        if i >= self.total_samples {
            Stage::Idle
        } else if i < self.ramp_samples {
            Stage::Attack
        } else if i >= self.total_samples - self.ramp_samples {
            Stage::Release
        } else {
            Stage::Hold
        }
    }
}
