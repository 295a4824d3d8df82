//! `GeminiClient`, the REST implementation of both collaborator traits.
//!
//! Calls `POST {base_url}/v1beta/models/{model}:generateContent`.  The base
//! URL, both model identifiers and the optional timeout come from
//! [`GeminiConfig`]; nothing is hardcoded here.

use async_trait::async_trait;

use super::wire::{GenerateContentRequest, GenerateContentResponse, MultiSpeakerVoiceConfig};
use super::{GeminiError, SpeechSynthesizer, TextGenerator};
use crate::config::{ApiKey, GeminiConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini `generateContent` client.
///
/// Cheap to clone; the inner `reqwest::Client` is reference-counted.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from application config.
    ///
    /// The HTTP client gets a per-request timeout only when
    /// `config.timeout_secs` is set.  A default client is used as a fallback
    /// if the builder fails.
    pub fn from_config(config: &GeminiConfig) -> Self {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Self {
            client: builder.build().unwrap_or_else(|_| reqwest::Client::new()),
            config: config.clone(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate_content(
        &self,
        api_key: &ApiKey,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.endpoint(model);
        log::debug!("gemini: POST {url}");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key.expose())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: api_error_message(&message),
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))
    }
}

/// Pull `error.message` out of a Google API error body, falling back to the
/// raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(
        &self,
        api_key: &ApiKey,
        prompt: &str,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let body = GenerateContentRequest::text(prompt);
        self.generate_content(api_key, &self.config.text_model, &body)
            .await
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiClient {
    async fn synthesize_speech(
        &self,
        api_key: &ApiKey,
        dialogue: &str,
        voices: &MultiSpeakerVoiceConfig,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let body = GenerateContentRequest::speech(dialogue, voices.clone());
        self.generate_content(api_key, &self.config.tts_model, &body)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            base_url: base_url.into(),
            ..GeminiConfig::default()
        }
    }

    #[test]
    fn endpoint_uses_model_and_strips_trailing_slash() {
        let client = GeminiClient::from_config(&make_config("https://example.test/"));
        assert_eq!(
            client.endpoint("gemini-2.0-flash"),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn from_config_accepts_timeout() {
        let config = GeminiConfig {
            timeout_secs: Some(30),
            ..GeminiConfig::default()
        };
        let _client = GeminiClient::from_config(&config);
    }

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":400,"message":"Voice name Brix is not supported","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "Voice name Brix is not supported");
    }

    #[test]
    fn non_json_error_body_is_kept() {
        assert_eq!(api_error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    /// `GeminiClient` must be usable as both trait objects.
    #[test]
    fn client_is_object_safe() {
        let client = GeminiClient::from_config(&GeminiConfig::default());
        let _text: Box<dyn TextGenerator> = Box::new(client.clone());
        let _speech: Box<dyn SpeechSynthesizer> = Box::new(client);
    }
}
