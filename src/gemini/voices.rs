//! Speaker → voice assignment for multi-speaker synthesis.

use std::collections::BTreeMap;

use thiserror::Error;

use super::wire::{
    MultiSpeakerVoiceConfig, PrebuiltVoiceConfig, SpeakerVoiceConfig, VoiceConfig,
};
use crate::dialogue::{SPEAKER_A, SPEAKER_B};

/// Speaker name → prebuilt voice name.
///
/// A `BTreeMap` so that iteration (and therefore the request body) is sorted
/// by speaker name and identical for identical input.
pub type VoiceMap = BTreeMap<String, String>;

/// Prebuilt voices offered by the Gemini TTS models.
///
/// Used for listing and for a non-fatal warning only; an unknown name is
/// passed through and rejected (or not) by the provider.
pub const SUPPORTED_VOICES: &[&str] = &[
    "Zephyr", "Puck", "Charon", "Kore", "Fenrir", "Leda", "Orus", "Aoede", "Callirrhoe",
    "Autonoe", "Enceladus", "Iapetus", "Umbriel", "Algieba", "Despina", "Erinome", "Algenib",
    "Rasalgethi", "Laomedeia", "Achernar", "Alnilam", "Schedar", "Gacrux", "Pulcherrima",
    "Achird", "Zubenelgenubi", "Vindemiatrix", "Sadachbia", "Sadaltager", "Sulafat",
];

/// Default voices: `Ana=Kore`, `Luis=Puck`.
pub fn default_voice_map() -> VoiceMap {
    VoiceMap::from([
        (SPEAKER_A.to_string(), "Kore".to_string()),
        (SPEAKER_B.to_string(), "Puck".to_string()),
    ])
}

/// Whether `voice` is one of [`SUPPORTED_VOICES`].
pub fn is_supported_voice(voice: &str) -> bool {
    SUPPORTED_VOICES.contains(&voice)
}

// ---------------------------------------------------------------------------
// build_speaker_config
// ---------------------------------------------------------------------------

/// One `SpeakerVoiceConfig` per `(speaker, voice)` pair, in iteration order.
///
/// No validation happens here: the caller guarantees the speaker set, and the
/// provider judges the voice names.
pub fn build_speaker_config<'a, I>(voices: I) -> MultiSpeakerVoiceConfig
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    MultiSpeakerVoiceConfig {
        speaker_voice_configs: voices
            .into_iter()
            .map(|(speaker, voice)| SpeakerVoiceConfig {
                speaker: speaker.clone(),
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice.clone(),
                    },
                },
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// parse_voice_map
// ---------------------------------------------------------------------------

/// Errors from parsing a `name=voice;name=voice` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceMapError {
    #[error("voice entry {0:?} is not of the form name=voice")]
    Malformed(String),

    #[error("speaker {0:?} is assigned more than once")]
    DuplicateSpeaker(String),
}

/// Parse the CLI form `Ana=Kore;Luis=Puck`.
///
/// Whitespace around names is ignored and empty entries (e.g. a trailing `;`)
/// are skipped.  Which speakers are present is checked by the pipeline.
///
/// ```
/// use dialogue_audio::gemini::parse_voice_map;
///
/// let map = parse_voice_map("Ana=Kore; Luis=Puck").unwrap();
/// assert_eq!(map["Luis"], "Puck");
/// ```
pub fn parse_voice_map(spec: &str) -> Result<VoiceMap, VoiceMapError> {
    let mut map = VoiceMap::new();
    for entry in spec.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, voice) = entry
            .split_once('=')
            .map(|(n, v)| (n.trim(), v.trim()))
            .filter(|(n, v)| !n.is_empty() && !v.is_empty())
            .ok_or_else(|| VoiceMapError::Malformed(entry.to_string()))?;

        if map.insert(name.to_string(), voice.to_string()).is_some() {
            return Err(VoiceMapError::DuplicateSpeaker(name.to_string()));
        }
    }
    Ok(map)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
