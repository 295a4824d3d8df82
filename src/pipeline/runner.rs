//! Pipeline orchestrator: topic → dialogue → transcript → speech → WAV.
//!
//! # Pipeline flow
//!
//! ```text
//! resolve credentials ──none──▶ MissingCredential   (no remote call)
//!   └─▶ check voices ──bad──▶ InvalidVoices
//!         └─▶ raw text?  yes ─▶ use input verbatim
//!                        no  ─▶ build_prompt → TextGenerator → clean_dialogue
//!               └─▶ write <base>.dialogo.txt
//!                     └─▶ SpeechSynthesizer → extract_audio
//!                           └─▶ spawn_blocking(write_wav)  → <base>.wav
//!                                 └─▶ [transcribe] spawn_blocking(Transcriber) → <base>.txt
//! ```
//!
//! Stages run strictly in sequence.  A failure stops the run; files written
//! by earlier stages stay on disk.  Transcription failures are only logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::audio::{write_wav, AudioError};
use crate::config::{CredentialProvider, DialogueConfig};
use crate::dialogue::{build_prompt, clean_dialogue, SPEAKER_A, SPEAKER_B};
use crate::gemini::{
    build_speaker_config, extract_audio, extract_text, is_supported_voice, GeminiError,
    SpeechSynthesizer, TextGenerator, VoiceMap,
};
use crate::transcribe::{whisper_language_hint, Transcriber};

use super::output::ArtifactSet;
use super::state::PipelineStage;

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// Everything one run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Topic to write about, or the dialogue itself when `use_raw_text`.
    pub topic_or_text: String,
    /// ISO-639-1 language code.
    pub language: String,
    pub dialect: Option<String>,
    pub level: Option<String>,
    pub target_word_count: u32,
    /// Skip text generation and speak `topic_or_text` as given.
    pub use_raw_text: bool,
    pub voices: VoiceMap,
    /// Run the transcription tool after synthesis.
    pub transcribe: bool,
    /// Artifact base path, without extension.
    pub output_base: PathBuf,
}

impl GenerationRequest {
    /// A generation-mode request using the configured dialogue defaults.
    pub fn from_config(
        config: &DialogueConfig,
        topic_or_text: impl Into<String>,
        output_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            topic_or_text: topic_or_text.into(),
            language: config.language.clone(),
            dialect: config.dialect.clone(),
            level: config.level.clone(),
            target_word_count: config.word_count,
            use_raw_text: false,
            voices: config.voices.clone(),
            transcribe: false,
            output_base: output_base.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no Gemini API key found; set GEMINI_API_KEY or run `dialogue-audio set-key`")]
    MissingCredential,

    #[error("voices must be assigned to exactly Ana and Luis (got: {0})")]
    InvalidVoices(String),

    #[error("input text is empty")]
    EmptyInput,

    #[error("the model returned no dialogue text")]
    EmptyGeneration,

    #[error("speech synthesis returned no usable audio: {0}")]
    SynthesisPayload(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write audio: {0}")]
    Audio(#[from] AudioError),

    #[error("Gemini request failed: {0}")]
    Remote(#[source] GeminiError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Callback invoked when the run enters a new stage.
pub type StageCallback<'a> = dyn Fn(PipelineStage) + Send + Sync + 'a;

// ---------------------------------------------------------------------------
// DialoguePipeline
// ---------------------------------------------------------------------------

/// Runs one generation request end to end.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use dialogue_audio::config::{AppConfig, EnvCredentials};
/// use dialogue_audio::gemini::GeminiClient;
/// use dialogue_audio::pipeline::{DialoguePipeline, GenerationRequest};
/// use dialogue_audio::transcribe::WhisperCli;
///
/// # async fn example() -> Result<(), dialogue_audio::pipeline::PipelineError> {
/// let config = AppConfig::default();
/// let gemini = Arc::new(GeminiClient::from_config(&config.gemini));
/// let pipeline = DialoguePipeline::new(
///     Arc::new(EnvCredentials::new()),
///     gemini.clone(),
///     gemini,
///     Arc::new(WhisperCli::from_config(&config.transcription)),
/// );
///
/// let request = GenerationRequest::from_config(&config.dialogue, "the weather", "/tmp/weather");
/// let artifacts = pipeline.run(&request, &|stage| println!("{stage}")).await?;
/// println!("{}", artifacts.audio_path.display());
/// # Ok(())
/// # }
/// ```
pub struct DialoguePipeline {
    credentials: Arc<dyn CredentialProvider>,
    text: Arc<dyn TextGenerator>,
    speech: Arc<dyn SpeechSynthesizer>,
    transcriber: Arc<dyn Transcriber>,
}

impl DialoguePipeline {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        text: Arc<dyn TextGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            credentials,
            text,
            speech,
            transcriber,
        }
    }

    /// Execute `request`, reporting each stage through `on_stage`.
    pub async fn run(
        &self,
        request: &GenerationRequest,
        on_stage: &StageCallback<'_>,
    ) -> Result<ArtifactSet, PipelineError> {
        // ── 1. Credentials ───────────────────────────────────────────────
        on_stage(PipelineStage::ResolvingCredentials);
        let api_key = self
            .credentials
            .resolve()
            .ok_or(PipelineError::MissingCredential)?;

        check_voices(&request.voices)?;

        // ── 2. Dialogue text ─────────────────────────────────────────────
        let dialogue = if request.use_raw_text {
            if request.topic_or_text.trim().is_empty() {
                return Err(PipelineError::EmptyInput);
            }
            log::info!("pipeline: using raw text ({} bytes)", request.topic_or_text.len());
            request.topic_or_text.clone()
        } else {
            on_stage(PipelineStage::RequestingText);
            let prompt = build_prompt(
                &request.topic_or_text,
                &request.language,
                request.dialect.as_deref(),
                request.level.as_deref(),
                request.target_word_count,
            );
            log::debug!("pipeline: prompt = {prompt:?}");

            let response = self
                .text
                .generate_text(&api_key, &prompt)
                .await
                .map_err(PipelineError::Remote)?;
            let raw = extract_text(&response).map_err(|e| match e {
                GeminiError::PayloadNotFound(_) => PipelineError::EmptyGeneration,
                other => PipelineError::Remote(other),
            })?;

            let cleaned = clean_dialogue(&raw);
            if cleaned.is_empty() {
                return Err(PipelineError::EmptyGeneration);
            }
            cleaned
        };

        // ── 3. Transcript ────────────────────────────────────────────────
        let mut artifacts = ArtifactSet::for_base(&request.output_base);

        on_stage(PipelineStage::WritingTranscript);
        tokio::fs::write(&artifacts.transcript_path, dialogue.as_bytes())
            .await
            .map_err(|source| PipelineError::Io {
                path: artifacts.transcript_path.clone(),
                source,
            })?;
        log::info!("pipeline: transcript → {}", artifacts.transcript_path.display());

        // ── 4. Speech ────────────────────────────────────────────────────
        on_stage(PipelineStage::RequestingSpeech);
        let voices = build_speaker_config(&request.voices);
        let response = self
            .speech
            .synthesize_speech(&api_key, &dialogue, &voices)
            .await
            .map_err(PipelineError::Remote)?;
        let audio =
            extract_audio(&response).map_err(|e| PipelineError::SynthesisPayload(e.to_string()))?;

        // ── 5. WAV (blocking → thread pool) ──────────────────────────────
        on_stage(PipelineStage::WritingAudio);
        let audio_path = artifacts.audio_path.clone();
        tokio::task::spawn_blocking(move || write_wav(&audio_path, &audio.pcm, audio.sample_rate))
            .await
            .map_err(|e| PipelineError::Internal(e.to_string()))??;
        log::info!("pipeline: audio → {}", artifacts.audio_path.display());

        // ── 6. Transcription (optional, non-fatal) ───────────────────────
        if request.transcribe {
            on_stage(PipelineStage::Transcribing);
            artifacts.transcription_path =
                self.transcribe(&artifacts.audio_path, &request.language).await;
        }

        Ok(artifacts)
    }

    async fn transcribe(&self, audio: &Path, language: &str) -> Option<PathBuf> {
        let transcriber = Arc::clone(&self.transcriber);
        let audio = audio.to_path_buf();
        let hint = whisper_language_hint(language);

        match tokio::task::spawn_blocking(move || transcriber.transcribe(&audio, hint)).await {
            Ok(Ok(Some(path))) => {
                log::info!("pipeline: transcription → {}", path.display());
                Some(path)
            }
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                log::warn!("pipeline: transcription skipped: {e}");
                None
            }
            Err(e) => {
                log::warn!("pipeline: transcription task failed: {e}");
                None
            }
        }
    }
}

/// The voice map must name exactly the two dialogue speakers.
///
/// Voice names themselves are not validated; unknown ones only warn.
fn check_voices(voices: &VoiceMap) -> Result<(), PipelineError> {
    let exact = voices.len() == 2 && voices.contains_key(SPEAKER_A) && voices.contains_key(SPEAKER_B);
    if !exact {
        let names: Vec<&str> = voices.keys().map(String::as_str).collect();
        return Err(PipelineError::InvalidVoices(names.join(", ")));
    }
    for voice in voices.values().filter(|v| !is_supported_voice(v)) {
        log::warn!("pipeline: voice {voice:?} is not a known Gemini voice");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
