//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for cross-platform directories, TOML persistence via
//! `AppConfig::load` / `AppConfig::save`, and API key lookup via
//! [`CredentialProvider`].

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::{ApiKey, CredentialError, CredentialProvider, EnvCredentials, StaticCredentials};
pub use paths::AppPaths;
pub use settings::{AppConfig, DialogueConfig, GeminiConfig, OutputConfig, TranscriptionConfig};
