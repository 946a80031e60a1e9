pub mod codec;
pub mod config;
pub mod dsp;
pub mod error;
pub mod lexer;
pub mod player;
pub mod schedule;
pub mod sequencer;
pub mod session;
pub mod symbol;
pub mod timing;
pub mod token;

#[cfg(feature = "runtime")]
pub mod clock;

pub use codec::{UNKNOWN_MARKER, decode, decode_strict, encode};
pub use config::PlaybackConfig;
pub use error::{MorseError, MorseResult};
pub use player::{PlayOutcome, Player};
pub use schedule::{Action, Schedule};
pub use sequencer::{Clock, NoTone, SequenceOutcome, Sequencer, SignalEmitter, ToneEmitter};
pub use session::PlaybackSession;
pub use timing::Timing;

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the crate version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: text → Morse.
#[wasm_bindgen]
pub fn encode_text(text: &str) -> String {
    codec::encode(text)
}

/// WASM-exposed: Morse → text.
#[wasm_bindgen]
pub fn decode_morse(morse: &str) -> String {
    codec::decode(morse)
}

/// WASM-exposed: length of one unit in milliseconds.
#[wasm_bindgen]
pub fn unit_time_ms(wpm: u32) -> Result<f64, JsValue> {
    Timing::from_wpm(wpm)
        .map(|t| t.unit_ms())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: compile a Morse string into its timed action list.
#[wasm_bindgen]
pub fn morse_schedule(morse: &str, wpm: u32) -> Result<JsValue, JsValue> {
    let timing = Timing::from_wpm(wpm).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let schedule = schedule::compile(morse, timing);
    serde_wasm_bindgen::to_value(&schedule).map_err(|e| JsValue::from_str(&format!("{e}")))
}

#[derive(Serialize)]
struct DictionaryEntry {
    character: char,
    pattern: &'static str,
}

/// WASM-exposed: the reference chart (every symbol except the word
/// separator), in table order.
#[wasm_bindgen]
pub fn morse_dictionary() -> Result<JsValue, JsValue> {
    let entries: Vec<DictionaryEntry> = symbol::SymbolTable::global()
        .dictionary()
        .into_iter()
        .map(|(character, pattern)| DictionaryEntry { character, pattern })
        .collect();
    serde_wasm_bindgen::to_value(&entries).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render a Morse string to a WAV byte array with the
/// default tone settings.
#[wasm_bindgen]
pub fn render_morse_wav(morse: &str, wpm: u32, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
    let (schedule, config) = prepare_render(morse, wpm, sample_rate)?;
    Ok(dsp::renderer::render_wav(&schedule, &config, sample_rate))
}

/// WASM-exposed: render a Morse string to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_morse_samples(morse: &str, wpm: u32, sample_rate: u32) -> Result<Vec<f32>, JsValue> {
    let (schedule, config) = prepare_render(morse, wpm, sample_rate)?;
    Ok(dsp::renderer::render_samples(&schedule, &config, sample_rate))
}

fn prepare_render(
    morse: &str,
    wpm: u32,
    sample_rate: u32,
) -> Result<(Schedule, PlaybackConfig), JsValue> {
    let config = PlaybackConfig {
        wpm,
        sample_rate,
        ..Default::default()
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let timing = config
        .timing()
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    Ok((schedule::compile(morse.trim(), timing), config))
}
