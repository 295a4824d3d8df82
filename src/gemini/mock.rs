//! In-memory Gemini double for pipeline and job tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::sync::Notify;

use super::wire::{Candidate, Content, GenerateContentResponse, InlineData, Part};
use super::{GeminiError, MultiSpeakerVoiceConfig, SpeechSynthesizer, TextGenerator};
use crate::config::ApiKey;

/// What a mocked call answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok(GenerateContentResponse),
    ApiError(u16),
    Panic,
}

impl Reply {
    fn into_result(self) -> Result<GenerateContentResponse, GeminiError> {
        match self {
            Reply::Ok(resp) => Ok(resp),
            Reply::ApiError(status) => Err(GeminiError::Api {
                status,
                message: "mock failure".into(),
            }),
            Reply::Panic => panic!("mock collaborator panicked"),
        }
    }
}

/// One candidate with the given parts.
fn response_with(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content { role: None, parts }),
            finish_reason: Some("STOP".into()),
        }],
    }
}

/// A text response.
pub fn text_response(text: &str) -> Reply {
    Reply::Ok(response_with(vec![Part::text(text)]))
}

/// An inline audio response at 24 kHz.
pub fn audio_response(pcm: &[u8]) -> Reply {
    Reply::Ok(response_with(vec![Part {
        text: None,
        inline_data: Some(InlineData {
            mime_type: "audio/L16;codec=pcm;rate=24000".into(),
            data: STANDARD.encode(pcm),
        }),
    }]))
}

/// A response with a candidate but no inline data.
pub fn no_audio_response() -> Reply {
    Reply::Ok(response_with(vec![Part::text("I cannot speak today.")]))
}

/// Fake text and speech collaborator that records every call.
///
/// With a gate set, text generation waits for `gate.notify_one()` before
/// answering.
pub struct MockGemini {
    text_reply: Reply,
    speech_reply: Reply,
    gate: Option<Arc<Notify>>,
    prompts: Mutex<Vec<String>>,
    spoken: Mutex<Vec<(String, MultiSpeakerVoiceConfig)>>,
}

impl MockGemini {
    pub fn new(text_reply: Reply, speech_reply: Reply) -> Self {
        Self {
            text_reply,
            speech_reply,
            gate: None,
            prompts: Mutex::new(Vec::new()),
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Dialogue text plus one second of silent audio.
    pub fn ok(dialogue: &str) -> Self {
        Self::new(text_response(dialogue), audio_response(&[0u8; 48_000]))
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn spoken(&self) -> Vec<(String, MultiSpeakerVoiceConfig)> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGemini {
    async fn generate_text(
        &self,
        _api_key: &ApiKey,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.text_reply.clone().into_result()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockGemini {
    async fn synthesize_speech(
        &self,
        _api_key: &ApiKey,
        dialogue: &str,
        voices: &MultiSpeakerVoiceConfig,
    ) -> Result<GenerateContentResponse, GeminiError> {
        self.spoken
            .lock()
            .unwrap()
            .push((dialogue.to_string(), voices.clone()));
        self.speech_reply.clone().into_result()
    }
}
