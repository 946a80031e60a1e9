//! Morse CLI - translate text and Morse, play it on the terminal, or
//! render it to a WAV file.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use morse_translator_core::clock::TokioClock;
use morse_translator_core::dsp::renderer::render_wav;
use morse_translator_core::symbol::SymbolTable;
use morse_translator_core::{
    MorseResult, NoTone, PlayOutcome, PlaybackConfig, Player, SignalEmitter, ToneEmitter,
    decode, decode_strict, encode, schedule,
};

/// Morse translator with timed playback
#[derive(Parser)]
#[command(name = "morse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON playback config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Rate in words per minute (overrides the config)
    #[arg(short, long, global = true)]
    wpm: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text to Morse
    Encode {
        /// Text to translate
        text: String,
    },

    /// Translate Morse to text
    Decode {
        /// Morse string (dots, dashes, spaces and `/`)
        morse: String,

        /// Fail on tokens that are not dot/dash groups
        #[arg(long)]
        strict: bool,
    },

    /// Key the message on the terminal in real time
    Play {
        /// Text to play (or Morse with --morse)
        input: String,

        /// Treat the input as Morse instead of text
        #[arg(long)]
        morse: bool,

        /// Repeat until interrupted
        #[arg(long = "loop")]
        repeat: bool,

        /// Signal only, no tone
        #[arg(long)]
        mute: bool,
    },

    /// Render the message to a WAV file
    Render {
        /// Text to render (or Morse with --morse)
        input: String,

        /// Treat the input as Morse instead of text
        #[arg(long)]
        morse: bool,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the reference chart
    Table,
}

/// Lamp drawn on stderr.
struct TerminalLamp;

impl SignalEmitter for TerminalLamp {
    fn set_signal(&self, on: bool) {
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r{}", if on { "●" } else { "○" });
        let _ = err.flush();
    }
}

/// The terminal has no tone output; pulses are only traced.
struct TracedTone;

impl ToneEmitter for TracedTone {
    fn play_tone(&self, frequency_hz: f64, duration: Duration) -> MorseResult<()> {
        debug!(frequency_hz, ms = duration.as_millis() as u64, "tone");
        Ok(())
    }
}

fn load_config(cli: &Cli) -> Result<PlaybackConfig> {
    let mut config = match &cli.config {
        Some(path) => PlaybackConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PlaybackConfig::default(),
    };
    if let Some(wpm) = cli.wpm {
        config.wpm = wpm;
    }
    config.validate().context("invalid playback settings")?;
    Ok(config)
}

fn to_morse(input: &str, is_morse: bool) -> String {
    if is_morse {
        input.trim().to_string()
    } else {
        encode(input)
    }
}

async fn play<T: ToneEmitter>(
    config: PlaybackConfig,
    tone: T,
    morse: &str,
    repeat: bool,
) -> Result<()> {
    let player = Player::new(TerminalLamp, tone, TokioClock, config)?;
    player.session().set_loop(repeat);

    eprintln!("{morse}");
    let play = player.play(morse);
    tokio::pin!(play);
    let outcome = tokio::select! {
        outcome = &mut play => outcome,
        _ = tokio::signal::ctrl_c() => {
            player.stop();
            play.await
        }
    };
    eprintln!();

    match outcome {
        PlayOutcome::NothingToPlay => anyhow::bail!("nothing to play"),
        PlayOutcome::AlreadyPlaying => anyhow::bail!("a playback is already running"),
        PlayOutcome::Finished { iterations } | PlayOutcome::Stopped { iterations } => {
            debug!(iterations, "done");
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Commands::Encode { text } => println!("{}", encode(&text)),
        Commands::Decode { morse, strict } => {
            let text = if strict {
                decode_strict(&morse)?
            } else {
                decode(&morse)
            };
            println!("{text}");
        }
        Commands::Play {
            input,
            morse,
            repeat,
            mute,
        } => {
            let morse = to_morse(&input, morse);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            if mute {
                runtime.block_on(play(config, NoTone, &morse, repeat))?;
            } else {
                runtime.block_on(play(config, TracedTone, &morse, repeat))?;
            }
        }
        Commands::Render {
            input,
            morse,
            output,
        } => {
            let morse = to_morse(&input, morse);
            let schedule = schedule::compile(&morse, config.timing()?);
            let wav = render_wav(&schedule, &config, config.sample_rate);
            std::fs::write(&output, wav)
                .with_context(|| format!("failed to write {}", output.display()))?;
            eprintln!(
                "wrote {} ({:.2} s)",
                output.display(),
                schedule.total.as_secs_f64()
            );
        }
        Commands::Table => {
            for (ch, pattern) in SymbolTable::global().dictionary() {
                println!("{ch}  {pattern}");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
