//! DSP: offline synthesis of the keyed tone.
//!
//! Live playback hands pulses to an external tone emitter; this module is
//! for rendering the same pulse train to PCM or WAV (export, previews,
//! AudioWorklet buffers).

pub mod envelope;
pub mod oscillator;
pub mod renderer;
pub mod voice;
