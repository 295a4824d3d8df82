//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\dialogue-audio\
//!   macOS:   ~/Library/Application Support/dialogue-audio/
//!   Linux:   ~/.config/dialogue-audio/
//!
//! Working dir (default output folder + saved API key):
//!   ~/AudioNotebookLM/
//!   ~/AudioNotebookLM/.gemini_key

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Default output directory for generated artifacts.
    pub app_dir: PathBuf,
    /// File holding a saved Gemini API key.
    pub key_file: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "dialogue-audio";
    const WORK_DIR: &'static str = "AudioNotebookLM";
    const KEY_FILE: &'static str = ".gemini_key";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let app_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::WORK_DIR);

        Self {
            settings_file: config_dir.join("settings.toml"),
            key_file: app_dir.join(Self::KEY_FILE),
            config_dir,
            app_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_non_empty() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.to_str().is_some_and(|s| !s.is_empty()));
        assert!(paths.app_dir.ends_with("AudioNotebookLM"));
        assert!(paths
            .settings_file
            .file_name()
            .is_some_and(|n| n == "settings.toml"));
        assert!(paths
            .key_file
            .file_name()
            .is_some_and(|n| n == ".gemini_key"));
        assert!(paths.key_file.starts_with(&paths.app_dir));
    }
}
