//! WAV renderer. Renders a Schedule to PCM offline.
//!
//! Walks the same actions the live sequencer executes: tones start a voice
//! at the cursor, waits advance the cursor. Signal actions are ignored.

use std::time::Duration;

use crate::config::PlaybackConfig;
use crate::schedule::{Action, Schedule};

use super::voice::Voice;

fn samples_for(duration: Duration, sample_rate: u32) -> usize {
    (duration.as_secs_f64() * sample_rate as f64).round() as usize
}

/// Render a schedule to mono f32 samples.
pub fn render_samples(schedule: &Schedule, config: &PlaybackConfig, sample_rate: u32) -> Vec<f32> {
    let mut out = vec![0.0f32; samples_for(schedule.total, sample_rate)];
    let mut voice = Voice::new(sample_rate as f64, config);
    let mut cursor = Duration::ZERO;

    for token in &schedule.tokens {
        for action in &token.actions {
            match *action {
                Action::Tone(length) => {
                    let start = samples_for(cursor, sample_rate);
                    let len = samples_for(length, sample_rate);
                    voice.key_down(len);
                    for slot in out.iter_mut().skip(start).take(len) {
                        *slot = voice.next_sample() as f32;
                    }
                }
                Action::Wait(length) => cursor += length,
                Action::Signal(_) => {}
            }
        }
    }

    out
}

/// Render a schedule to a 16-bit mono WAV file as bytes.
pub fn render_wav(schedule: &Schedule, config: &PlaybackConfig, sample_rate: u32) -> Vec<u8> {
    let pcm: Vec<i16> = render_samples(schedule, config, sample_rate)
        .into_iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect();
    encode_wav(&pcm, sample_rate, 1)
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}
