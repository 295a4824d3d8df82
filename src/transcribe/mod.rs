//! Optional speech-to-text pass over the finished WAV.
//!
//! The pipeline calls a [`Transcriber`] on the blocking pool after the audio
//! has been written.  Every failure here is non-fatal: the pipeline logs it
//! and reports no transcription artifact.

pub mod whisper;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use whisper::{whisper_language_hint, WhisperCli, WHISPER_LANGUAGES};

#[cfg(test)]
pub use whisper::MockTranscriber;

/// Errors from running the transcription tool.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The configured program is not installed / not on `PATH`.
    #[error("transcription tool not found: {0}")]
    NotFound(String),

    /// The program exists but could not be started.
    #[error("failed to start transcription tool: {0}")]
    Spawn(#[source] std::io::Error),

    /// The program ran and exited unsuccessfully.
    #[error("transcription tool exited with {0}")]
    Failed(String),
}

/// Speech-to-text collaborator.
///
/// Synchronous; callers run it via `tokio::task::spawn_blocking`.
pub trait Transcriber: Send + Sync {
    /// Transcribe `audio`.  `language` is a Whisper language hint; `None`
    /// lets the tool detect it.
    ///
    /// Returns the transcription file when the tool produced one.
    fn transcribe(
        &self,
        audio: &Path,
        language: Option<&str>,
    ) -> Result<Option<PathBuf>, TranscriptionError>;
}
