//! API key lookup and persistence.
//!
//! Lookup order for [`EnvCredentials`]:
//!
//! | Order | Source                              |
//! |-------|-------------------------------------|
//! | 1     | `GEMINI_API_KEY` environment var    |
//! | 2     | `GOOGLE_API_KEY` environment var    |
//! | 3     | key file (`~/AudioNotebookLM/.gemini_key`) |
//!
//! Blank values are skipped.  Persisting only writes the key file; the
//! process environment is never modified.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::AppPaths;

const ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

// ---------------------------------------------------------------------------
// ApiKey
// ---------------------------------------------------------------------------

/// A Gemini API key.  `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the request header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Trimmed key, or `None` when blank.
    fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim();
        (!key.is_empty()).then(|| Self(key.to_string()))
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// CredentialProvider
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key is empty")]
    Empty,

    #[error("failed to write key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("this credential source is read-only")]
    ReadOnly,
}

/// Source of the API key used by the pipeline.
pub trait CredentialProvider: Send + Sync {
    /// The current key, if any source has one.
    fn resolve(&self) -> Option<ApiKey>;

    /// Store a key so later runs can find it.
    fn persist(&self, key: &ApiKey) -> Result<(), CredentialError>;
}

// ---------------------------------------------------------------------------
// EnvCredentials
// ---------------------------------------------------------------------------

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variables first, then the key file.
pub struct EnvCredentials {
    key_file: PathBuf,
    lookup: EnvLookup,
}

impl std::fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredentials")
            .field("key_file", &self.key_file)
            .finish_non_exhaustive()
    }
}

impl EnvCredentials {
    /// Reads the process environment and the default key file.
    pub fn new() -> Self {
        Self::with_key_file(AppPaths::new().key_file)
    }

    pub fn with_key_file(key_file: impl Into<PathBuf>) -> Self {
        Self {
            key_file: key_file.into(),
            lookup: Box::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replace the environment lookup (tests use a fixed table).
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Box::new(lookup);
        self
    }

    pub fn key_file(&self) -> &Path {
        &self.key_file
    }

    fn from_key_file(&self) -> Option<ApiKey> {
        match std::fs::read_to_string(&self.key_file) {
            Ok(content) => ApiKey::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("credentials: cannot read {}: {e}", self.key_file.display());
                None
            }
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for EnvCredentials {
    fn resolve(&self) -> Option<ApiKey> {
        for &var in ENV_VARS {
            if let Some(key) = (self.lookup)(var).as_deref().and_then(ApiKey::parse) {
                log::debug!("credentials: using {var}");
                return Some(key);
            }
        }
        let key = self.from_key_file();
        if key.is_some() {
            log::debug!("credentials: using {}", self.key_file.display());
        }
        key
    }

    fn persist(&self, key: &ApiKey) -> Result<(), CredentialError> {
        let key = ApiKey::parse(key.expose()).ok_or(CredentialError::Empty)?;
        let io_err = |source: std::io::Error| CredentialError::Io {
            path: self.key_file.clone(),
            source,
        };

        if let Some(parent) = self.key_file.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.key_file, key.expose()).map_err(io_err)?;
        restrict_permissions(&self.key_file);

        log::info!("credentials: key saved to {}", self.key_file.display());
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        log::warn!("credentials: cannot chmod {}: {e}", path.display());
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

// ---------------------------------------------------------------------------
// StaticCredentials
// ---------------------------------------------------------------------------

/// A fixed key (or none).  Used by tests and by `--api-key`.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<ApiKey>);

impl StaticCredentials {
    pub fn new(key: Option<ApiKey>) -> Self {
        Self(key)
    }
}

impl CredentialProvider for StaticCredentials {
    fn resolve(&self) -> Option<ApiKey> {
        self.0.clone()
    }

    fn persist(&self, _key: &ApiKey) -> Result<(), CredentialError> {
        Err(CredentialError::ReadOnly)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
        let table: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| table.get(name).cloned()
    }

    #[test]
    fn gemini_var_wins_over_google_var_and_file() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join(".gemini_key");
        std::fs::write(&file, "from-file").unwrap();

        let creds = EnvCredentials::with_key_file(&file)
            .with_lookup(env(&[("GEMINI_API_KEY", "gem"), ("GOOGLE_API_KEY", "goo")]));

        assert_eq!(creds.resolve(), Some(ApiKey::new("gem")));
    }

    #[test]
    fn google_var_used_when_gemini_var_blank() {
        let dir = tempdir().expect("temp dir");
        let creds = EnvCredentials::with_key_file(dir.path().join("missing"))
            .with_lookup(env(&[("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "goo")]));

        assert_eq!(creds.resolve(), Some(ApiKey::new("goo")));
    }

    #[test]
    fn key_file_is_last_resort_and_trimmed() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join(".gemini_key");
        std::fs::write(&file, "  from-file\n").unwrap();

        let creds = EnvCredentials::with_key_file(&file).with_lookup(env(&[]));
        assert_eq!(creds.resolve(), Some(ApiKey::new("from-file")));
    }

    #[test]
    fn nothing_configured_resolves_none() {
        let dir = tempdir().expect("temp dir");
        let creds =
            EnvCredentials::with_key_file(dir.path().join(".gemini_key")).with_lookup(env(&[]));
        assert!(creds.resolve().is_none());
    }

    #[test]
    fn persist_writes_file_and_creates_parent() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join("nested").join(".gemini_key");
        let creds = EnvCredentials::with_key_file(&file).with_lookup(env(&[]));

        creds.persist(&ApiKey::new(" saved-key ")).expect("persist");

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "saved-key");
        assert_eq!(creds.resolve(), Some(ApiKey::new("saved-key")));
    }

    #[test]
    fn persist_rejects_blank_key() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join(".gemini_key");
        let creds = EnvCredentials::with_key_file(&file).with_lookup(env(&[]));

        assert!(matches!(
            creds.persist(&ApiKey::new("   ")),
            Err(CredentialError::Empty)
        ));
        assert!(!file.exists());
    }

    #[test]
    fn debug_redacts_key() {
        let printed = format!("{:?}", ApiKey::new("super-secret"));
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn static_credentials_are_read_only() {
        let creds = StaticCredentials::new(Some(ApiKey::new("k")));
        assert_eq!(creds.resolve(), Some(ApiKey::new("k")));
        assert!(matches!(
            creds.persist(&ApiKey::new("other")),
            Err(CredentialError::ReadOnly)
        ));
        assert!(StaticCredentials::default().resolve().is_none());
    }
}
