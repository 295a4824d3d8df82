//! Payload extraction from `generateContent` responses.
//!
//! Responses come in a few shapes.  Rather than probing optional fields ad
//! hoc, each payload kind has an ordered decision table of sources; the first
//! source that yields a usable payload wins, and an exhausted table is an
//! explicit [`GeminiError::PayloadNotFound`].
//!
//! | Kind  | Order | Source                                               |
//! |-------|-------|------------------------------------------------------|
//! | Text  | 1     | all text parts of the first candidate, concatenated  |
//! | Text  | 2     | first non-blank text part of any candidate           |
//! | Audio | 1     | first inline-data part of the first candidate        |

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::wire::{GenerateContentResponse, InlineData};
use super::GeminiError;
use crate::audio::DEFAULT_SAMPLE_RATE;

/// Which payload a response was expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Text,
    Audio,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadKind::Text => write!(f, "text"),
            PayloadKind::Audio => write!(f, "inline audio"),
        }
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum TextSource {
    FirstCandidateJoined,
    AnyCandidateText,
}

const TEXT_SOURCES: &[TextSource] = &[
    TextSource::FirstCandidateJoined,
    TextSource::AnyCandidateText,
];

impl TextSource {
    fn find_in(self, resp: &GenerateContentResponse) -> Option<String> {
        match self {
            TextSource::FirstCandidateJoined => {
                let joined: String = resp
                    .candidates
                    .first()?
                    .parts()
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect();
                Some(joined)
            }
            TextSource::AnyCandidateText => resp
                .candidates
                .iter()
                .flat_map(|c| c.parts())
                .filter_map(|p| p.text.as_deref())
                .find(|text| !text.trim().is_empty())
                .map(str::to_string),
        }
    }
}

/// Text payload of a response.
///
/// Whitespace-only text counts as absent.  The text is returned as-is; fence
/// and newline cleanup is the caller's business.
pub fn extract_text(resp: &GenerateContentResponse) -> Result<String, GeminiError> {
    TEXT_SOURCES
        .iter()
        .filter_map(|source| source.find_in(resp))
        .find(|text| !text.trim().is_empty())
        .ok_or(GeminiError::PayloadNotFound(PayloadKind::Text))
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

/// Decoded inline audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPayload {
    /// Little-endian 16-bit mono PCM.
    pub pcm: Vec<u8>,
    /// Sample rate from the MIME type, or [`DEFAULT_SAMPLE_RATE`].
    pub sample_rate: u32,
}

/// Audio payload of a response: the first inline-data part of the first
/// candidate, base64-decoded.
pub fn extract_audio(resp: &GenerateContentResponse) -> Result<AudioPayload, GeminiError> {
    let inline = first_inline_data(resp).ok_or(GeminiError::PayloadNotFound(PayloadKind::Audio))?;

    let pcm = STANDARD
        .decode(inline.data.trim())
        .map_err(|e| GeminiError::Decode(e.to_string()))?;

    Ok(AudioPayload {
        pcm,
        sample_rate: sample_rate_from_mime(&inline.mime_type).unwrap_or(DEFAULT_SAMPLE_RATE),
    })
}

fn first_inline_data(resp: &GenerateContentResponse) -> Option<&InlineData> {
    resp.candidates
        .first()?
        .parts()
        .iter()
        .find_map(|p| p.inline_data.as_ref())
}

/// Parse `rate=<n>` out of a MIME type such as `audio/L16;codec=pcm;rate=24000`.
fn sample_rate_from_mime(mime: &str) -> Option<u32> {
    mime.split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .filter(|rate| *rate > 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
