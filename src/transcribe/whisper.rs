//! `WhisperCli`: runs the openai-whisper command line tool.
//!
//! Command shape:
//!
//! ```text
//! <program> <args…> <wav> --model <size> [--language <hint>] --output_format txt --output_dir <dir>
//! ```
//!
//! Whisper names its output after the audio stem, so `<base>.wav` produces
//! `<base>.txt` next to it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{Transcriber, TranscriptionError};
use crate::config::TranscriptionConfig;

/// `--output_format` value, and the extension Whisper gives its output file.
const OUTPUT_FORMAT: &str = "txt";

/// Language codes Whisper is given as a hint.  Others are left to
/// auto-detection.
pub const WHISPER_LANGUAGES: &[&str] = &[
    "es", "en", "ar", "uk", "ru", "fr", "de", "it", "pt", "zh", "ja", "ko", "tr", "pl",
];

/// The Whisper hint for an app language code, or `None` when unsupported.
pub fn whisper_language_hint(code: &str) -> Option<&'static str> {
    let code = code.trim();
    WHISPER_LANGUAGES
        .iter()
        .copied()
        .find(|lang| lang.eq_ignore_ascii_case(code))
}

// ---------------------------------------------------------------------------
// WhisperCli
// ---------------------------------------------------------------------------

/// Subprocess-backed [`Transcriber`].
#[derive(Debug, Clone)]
pub struct WhisperCli {
    program: String,
    args: Vec<String>,
    model_size: String,
}

impl WhisperCli {
    pub fn new(program: impl Into<String>, args: Vec<String>, model_size: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            model_size: model_size.into(),
        }
    }

    pub fn from_config(config: &TranscriptionConfig) -> Self {
        Self::new(&config.program, config.args.clone(), &config.model_size)
    }

    /// Everything after the program name.
    fn command_args(&self, audio: &Path, language: Option<&str>, output_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.push(audio.into());
        args.push("--model".into());
        args.push(self.model_size.as_str().into());
        if let Some(lang) = language {
            args.push("--language".into());
            args.push(lang.into());
        }
        args.push("--output_format".into());
        args.push(OUTPUT_FORMAT.into());
        args.push("--output_dir".into());
        args.push(output_dir.into());
        args
    }
}

impl Transcriber for WhisperCli {
    fn transcribe(
        &self,
        audio: &Path,
        language: Option<&str>,
    ) -> Result<Option<PathBuf>, TranscriptionError> {
        let output_dir = match audio.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let args = self.command_args(audio, language, &output_dir);
        log::info!("transcribe: running {} on {}", self.program, audio.display());

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => TranscriptionError::NotFound(self.program.clone()),
                _ => TranscriptionError::Spawn(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::debug!("transcribe: stderr: {}", stderr.trim());
            return Err(TranscriptionError::Failed(output.status.to_string()));
        }

        let produced = audio.with_extension(OUTPUT_FORMAT);
        if produced.exists() {
            Ok(Some(produced))
        } else {
            log::warn!(
                "transcribe: tool succeeded but {} was not created",
                produced.display()
            );
            Ok(None)
        }
    }
}

// ---------------------------------------------------------------------------
// MockTranscriber (test only)
// ---------------------------------------------------------------------------

/// Records calls and writes a fixed transcription next to the audio.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockTranscriber {
    pub fail: bool,
    pub calls: std::sync::Mutex<Vec<(PathBuf, Option<String>)>>,
}

#[cfg(test)]
impl Transcriber for MockTranscriber {
    fn transcribe(
        &self,
        audio: &Path,
        language: Option<&str>,
    ) -> Result<Option<PathBuf>, TranscriptionError> {
        self.calls
            .lock()
            .unwrap()
            .push((audio.to_path_buf(), language.map(str::to_string)));
        if self.fail {
            return Err(TranscriptionError::NotFound("mock".into()));
        }
        let path = audio.with_extension(OUTPUT_FORMAT);
        std::fs::write(&path, "transcribed").map_err(TranscriptionError::Spawn)?;
        Ok(Some(path))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn strings(args: &[OsString]) -> Vec<&str> {
        args.iter().map(|a| a.to_str().unwrap()).collect()
    }

    #[test]
    fn hint_covers_supported_codes_only() {
        assert_eq!(whisper_language_hint("es"), Some("es"));
        assert_eq!(whisper_language_hint("PL"), Some("pl"));
        assert_eq!(whisper_language_hint("wo"), None);
        assert_eq!(whisper_language_hint(""), None);
    }

    #[test]
    fn default_command_shape() {
        let cli = WhisperCli::from_config(&TranscriptionConfig::default());
        let args = cli.command_args(Path::new("/out/x.wav"), Some("es"), Path::new("/out"));

        assert_eq!(cli.program, "python3");
        assert_eq!(
            strings(&args),
            vec![
                "-m", "whisper", "/out/x.wav", "--model", "small", "--language", "es",
                "--output_format", "txt", "--output_dir", "/out",
            ]
        );
    }

    #[test]
    fn language_flag_omitted_without_hint() {
        let cli = WhisperCli::new("whisper", vec![], "base");
        let args = cli.command_args(Path::new("a.wav"), None, Path::new("."));
        assert!(!strings(&args).contains(&"--language"));
        assert_eq!(strings(&args)[0], "a.wav");
    }

    #[test]
    fn missing_program_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let cli = WhisperCli::new("definitely-not-a-real-whisper-binary", vec![], "small");

        let err = cli
            .transcribe(&dir.path().join("a.wav"), None)
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failed() {
        let dir = tempdir().expect("temp dir");
        let cli = WhisperCli::new("false", vec![], "small");

        let err = cli
            .transcribe(&dir.path().join("a.wav"), Some("en"))
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::Failed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn success_without_output_file_is_none() {
        let dir = tempdir().expect("temp dir");
        let cli = WhisperCli::new("true", vec![], "small");

        let produced = cli.transcribe(&dir.path().join("a.wav"), None).unwrap();
        assert!(produced.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn reports_file_written_by_tool() {
        let dir = tempdir().expect("temp dir");
        let audio = dir.path().join("lesson.wav");
        // `sh -c script sh <wav> ...` : $1 is the audio path.
        let script = r#"printf 'hola' > "${1%.wav}.txt""#;
        let cli = WhisperCli::new(
            "sh",
            vec!["-c".into(), script.into(), "sh".into()],
            "small",
        );

        let produced = cli.transcribe(&audio, Some("es")).unwrap();
        assert_eq!(produced, Some(dir.path().join("lesson.txt")));
        assert_eq!(std::fs::read_to_string(dir.path().join("lesson.txt")).unwrap(), "hola");
    }
}
