use thiserror::Error;

/// Result alias used across the crate.
pub type MorseResult<T> = Result<T, MorseError>;

#[derive(Debug, Error)]
pub enum MorseError {
    /// A words-per-minute rate of zero (or otherwise unusable).
    #[error("invalid rate: {value} WPM (must be a positive integer)")]
    InvalidWpm { value: u32 },

    /// Rate text that is not an integer at all.
    #[error("cannot parse rate '{text}' as words per minute")]
    ParseWpm { text: String },

    /// A token that is neither a dot/dash pattern nor a word separator.
    /// Only produced by strict decoding.
    #[error("malformed morse token '{token}' at byte {offset}")]
    MalformedToken { token: String, offset: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid configuration value '{name}': {message}")]
    ConfigValue { name: &'static str, message: String },

    /// Reported by a tone emitter. Never aborts signal timing.
    #[error("tone output failed: {message}")]
    Tone { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MorseError {
    pub fn tone(message: impl Into<String>) -> Self {
        MorseError::Tone {
            message: message.into(),
        }
    }
}
