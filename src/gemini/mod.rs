//! Remote collaborators: Gemini text generation and speech synthesis.
//!
//! The pipeline only sees the two traits:
//!
//! * [`TextGenerator`]: prompt in, `generateContent` response out.
//! * [`SpeechSynthesizer`]: dialogue + voice assignment in, audio response out.
//!
//! Both return the raw [`GenerateContentResponse`]; picking the payload out of
//! it is done by the decision tables in [`payload`].  [`GeminiClient`]
//! implements both traits over the REST API.
//!
//! ```rust,no_run
//! use dialogue_audio::config::{ApiKey, GeminiConfig};
//! use dialogue_audio::gemini::{extract_text, GeminiClient, TextGenerator};
//!
//! # async fn example() -> Result<(), dialogue_audio::gemini::GeminiError> {
//! let client = GeminiClient::from_config(&GeminiConfig::default());
//! let key = ApiKey::new("...");
//! let resp = client.generate_text(&key, "Say hello").await?;
//! println!("{}", extract_text(&resp)?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod payload;
pub mod voices;
pub mod wire;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ApiKey;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::GeminiClient;
pub use payload::{extract_audio, extract_text, AudioPayload, PayloadKind};
pub use voices::{
    build_speaker_config, default_voice_map, is_supported_voice, parse_voice_map, VoiceMap,
    VoiceMapError, SUPPORTED_VOICES,
};
pub use wire::{GenerateContentResponse, MultiSpeakerVoiceConfig};

// ---------------------------------------------------------------------------
// GeminiError
// ---------------------------------------------------------------------------

/// Errors from a remote model call or from reading its response.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// None of the known response shapes carried the wanted payload.
    #[error("response contained no {0} payload")]
    PayloadNotFound(PayloadKind),

    /// The inline payload was not valid base64.
    #[error("failed to decode inline data: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GeminiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeminiError::Timeout
        } else {
            GeminiError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Text-generation collaborator.
///
/// Implementors must be `Send + Sync` so they can be held behind an
/// `Arc<dyn TextGenerator>`.  One attempt per call; no retries.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(
        &self,
        api_key: &ApiKey,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GeminiError>;
}

/// Speech-synthesis collaborator.  Requests audio-only output.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize_speech(
        &self,
        api_key: &ApiKey,
        dialogue: &str,
        voices: &MultiSpeakerVoiceConfig,
    ) -> Result<GenerateContentResponse, GeminiError>;
}
