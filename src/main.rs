//! Application entry point for the dialogue-audio command line.
//!
//! # Startup sequence
//!
//! 1. Initialise logging (`RUST_LOG` overrides the `info` default).
//! 2. Parse the command line.
//! 3. Load [`AppConfig`] from disk (returns default on first run).
//! 4. For `generate`: build the request, create the output folder, start a
//!    [`tokio`] runtime, submit to the [`JobRunner`] and print progress until
//!    the job finishes.
//!
//! # Usage
//!
//! ```bash
//! # Spanish A2 dialogue about the market, Mexican Spanish
//! dialogue-audio generate "el mercado" --dialect es-MX --level A2
//!
//! # English, custom voices, named output, with transcription
//! dialogue-audio generate "booking a hotel" -l en --dialect en-GB \
//!     --voices "Ana=Leda;Luis=Charon" --name hotel --transcribe
//!
//! # Speak an existing dialogue
//! dialogue-audio generate --text-file lesson.txt
//!
//! # Save the API key for later runs
//! dialogue-audio set-key AIza...
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;

use dialogue_audio::{
    config::{ApiKey, AppConfig, CredentialProvider, EnvCredentials, StaticCredentials},
    dialogue::language_label,
    gemini::{parse_voice_map, GeminiClient, SUPPORTED_VOICES},
    pipeline::{
        resolve_output_base, ArtifactSet, DialoguePipeline, GenerationRequest, JobEvent,
        JobRunner,
    },
    transcribe::WhisperCli,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(
    name = "dialogue-audio",
    version,
    about = "Generate two-speaker educational dialogues and synthesize them with Gemini"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a dialogue (or take one as given) and synthesize it to WAV
    Generate(GenerateArgs),
    /// Save a Gemini API key to the key file
    SetKey {
        /// The API key
        key: String,
    },
    /// List the prebuilt synthesis voices
    Voices,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Topic of the dialogue, or the dialogue itself with --raw
    #[arg(required_unless_present = "text_file")]
    topic: Option<String>,

    /// Read the dialogue from a file and speak it as given (implies --raw)
    #[arg(long, conflicts_with = "topic")]
    text_file: Option<PathBuf>,

    /// Treat TOPIC as the finished dialogue; skip text generation
    #[arg(long)]
    raw: bool,

    /// Language code (es, en, fr, ...)
    #[arg(short, long)]
    language: Option<String>,

    /// Dialect code (es-MX, en-GB, ...)
    #[arg(long)]
    dialect: Option<String>,

    /// CEFR level (A1 ... C2)
    #[arg(long)]
    level: Option<String>,

    /// Approximate length in words
    #[arg(short, long)]
    words: Option<u32>,

    /// Voice assignment, e.g. "Ana=Kore;Luis=Puck"
    #[arg(long)]
    voices: Option<String>,

    /// Run Whisper on the finished audio
    #[arg(long)]
    transcribe: bool,

    /// Output folder
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Base file name (defaults to a timestamp)
    #[arg(short, long)]
    name: Option<String>,

    /// Use this API key instead of the environment or key file
    #[arg(long)]
    api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Command line
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // 3. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    match cli.command {
        Command::Generate(args) => generate(args, &config),
        Command::SetKey { key } => set_key(&key),
        Command::Voices => {
            list_voices(&config);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn generate(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let request = build_request(&args, config)?;
    log::info!(
        "generating {} dialogue → {}",
        language_label(&request.language),
        request.output_base.display()
    );

    let credentials: Arc<dyn CredentialProvider> = match args.api_key {
        Some(key) => Arc::new(StaticCredentials::new(Some(ApiKey::new(key)))),
        None => Arc::new(EnvCredentials::new()),
    };
    let gemini = Arc::new(GeminiClient::from_config(&config.gemini));
    let pipeline = DialoguePipeline::new(
        credentials,
        gemini.clone(),
        gemini,
        Arc::new(WhisperCli::from_config(&config.transcription)),
    );

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let artifacts = rt.block_on(async move {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let runner = JobRunner::new(pipeline).with_events(event_tx);
        let handle = runner.submit(request)?;
        drop(runner);

        let progress = tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                if let JobEvent::Stage(stage) = event {
                    eprintln!("… {stage}");
                }
            }
        });

        let result = handle.wait().await;
        let _ = progress.await;
        anyhow::Ok(result?)
    })?;

    print_artifacts(&artifacts);
    Ok(())
}

/// Config defaults overridden by whatever was given on the command line.
fn build_request(args: &GenerateArgs, config: &AppConfig) -> Result<GenerationRequest> {
    let (text, use_raw_text) = match &args.text_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            (text, true)
        }
        None => (args.topic.clone().unwrap_or_default(), args.raw),
    };
    if !use_raw_text && text.trim().is_empty() {
        bail!("the topic is empty");
    }

    let dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.output.resolved_dir());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create output folder {}", dir.display()))?;
    let base = resolve_output_base(&dir, args.name.as_deref());

    let mut request = GenerationRequest::from_config(&config.dialogue, text, base);
    request.use_raw_text = use_raw_text;
    request.transcribe = args.transcribe || config.transcription.enabled;
    if let Some(language) = &args.language {
        request.language = language.clone();
    }
    if args.dialect.is_some() {
        request.dialect = args.dialect.clone();
    }
    if args.level.is_some() {
        request.level = args.level.clone();
    }
    if let Some(words) = args.words {
        request.target_word_count = words;
    }
    if let Some(spec) = &args.voices {
        request.voices.extend(parse_voice_map(spec)?);
    }
    Ok(request)
}

fn print_artifacts(artifacts: &ArtifactSet) {
    println!("Transcript:    {}", artifacts.transcript_path.display());
    println!("Audio:         {}", artifacts.audio_path.display());
    if let Some(path) = &artifacts.transcription_path {
        println!("Transcription: {}", path.display());
    }
}

// ---------------------------------------------------------------------------
// set-key / voices
// ---------------------------------------------------------------------------

fn set_key(key: &str) -> Result<()> {
    let credentials = EnvCredentials::new();
    credentials.persist(&ApiKey::new(key))?;
    println!("API key saved to {}", credentials.key_file().display());
    Ok(())
}

fn list_voices(config: &AppConfig) {
    for voice in SUPPORTED_VOICES {
        let speakers: Vec<&str> = config
            .dialogue
            .voices
            .iter()
            .filter(|(_, v)| v.as_str() == *voice)
            .map(|(speaker, _)| speaker.as_str())
            .collect();
        if speakers.is_empty() {
            println!("{voice}");
        } else {
            println!("{voice:<14} (default for {})", speakers.join(", "));
        }
    }
}
