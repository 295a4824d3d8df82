//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Every section is `#[serde(default)]`, so a partial file fills the rest from
//! defaults.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::gemini::{default_voice_map, VoiceMap};

// ---------------------------------------------------------------------------
// GeminiConfig
// ---------------------------------------------------------------------------

/// Remote model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API root, without the `/v1beta` path.
    pub base_url: String,
    /// Model used to write the dialogue.
    pub text_model: String,
    /// Multi-speaker TTS model.
    pub tts_model: String,
    /// Per-request HTTP timeout.  `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            text_model: "gemini-2.0-flash".into(),
            tts_model: "gemini-2.5-flash-preview-tts".into(),
            timeout_secs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// DialogueConfig
// ---------------------------------------------------------------------------

/// Defaults for the generation request; each is overridable on the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// ISO-639-1 language code (e.g. `"es"`).
    pub language: String,
    /// Locale code such as `"es-MX"`.
    pub dialect: Option<String>,
    /// CEFR level such as `"B1"`.
    pub level: Option<String>,
    /// Approximate dialogue length asked of the model.
    pub word_count: u32,
    /// Speaker → prebuilt voice.
    pub voices: VoiceMap,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            language: "es".into(),
            dialect: None,
            level: None,
            word_count: 320,
            voices: default_voice_map(),
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptionConfig
// ---------------------------------------------------------------------------

/// Settings for the optional Whisper pass over the finished audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Run the transcription tool after synthesis.
    pub enabled: bool,
    /// Executable to launch.
    pub program: String,
    /// Arguments placed before the audio path (e.g. `["-m", "whisper"]`).
    pub args: Vec<String>,
    /// Whisper model size (`tiny`, `base`, `small`, `medium`, `large`).
    pub model_size: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "python3".into(),
            args: vec!["-m".into(), "whisper".into()],
            model_size: "small".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output folder.  `None` means [`AppPaths::app_dir`].
    pub dir: Option<PathBuf>,
}

impl OutputConfig {
    /// The configured folder, or the platform default.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| AppPaths::new().app_dir)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use dialogue_audio::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let mut config = AppConfig::load().unwrap();
///
/// config.dialogue.level = Some("B1".into());
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote model settings.
    pub gemini: GeminiConfig,
    /// Generation defaults.
    pub dialogue: DialogueConfig,
    /// Optional transcription pass.
    pub transcription: TranscriptionConfig,
    /// Where artifacts are written.
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
