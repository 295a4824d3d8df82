//! Output naming: one safe base path, three artifacts derived from it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix of the dialogue transcript.
pub const TRANSCRIPT_SUFFIX: &str = ".dialogo.txt";
/// Suffix of the synthesized audio.
pub const AUDIO_SUFFIX: &str = ".wav";

/// Files produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub transcript_path: PathBuf,
    pub audio_path: PathBuf,
    /// Set only when the transcription tool produced its file.
    pub transcription_path: Option<PathBuf>,
}

impl ArtifactSet {
    /// Paths for `base` (no extension): `<base>.dialogo.txt`, `<base>.wav`.
    pub fn for_base(base: &Path) -> Self {
        Self {
            transcript_path: with_suffix(base, TRANSCRIPT_SUFFIX),
            audio_path: with_suffix(base, AUDIO_SUFFIX),
            transcription_path: None,
        }
    }
}

/// Append `suffix` to the final component without treating dots in the base
/// as an extension.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

// ---------------------------------------------------------------------------
// Base name resolution
// ---------------------------------------------------------------------------

/// `dialogue_YYYYmmdd_HHMMSS` in local time.
pub fn default_base_name() -> String {
    format!("dialogue_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

/// Make a user-supplied name safe to use as a single file name.
///
/// Letters, digits, `_`, `-` and `.` are kept; every run of anything else
/// becomes one `_`.  Leading dots are removed.  May return an empty string.
pub fn sanitize_base_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.trim().chars() {
        if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out.trim_start_matches('.').to_string()
}

/// `dir/<sanitized name>`, or `dir/dialogue_<timestamp>` when the name is
/// missing or sanitizes to nothing.
///
/// ```
/// use std::path::Path;
/// use dialogue_audio::pipeline::resolve_output_base;
///
/// let base = resolve_output_base(Path::new("/tmp/out"), Some("mi clase: día 1"));
/// assert_eq!(base, Path::new("/tmp/out/mi_clase_día_1"));
/// ```
pub fn resolve_output_base(dir: &Path, requested_name: Option<&str>) -> PathBuf {
    let name = requested_name
        .map(sanitize_base_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(default_base_name);
    dir.join(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_share_the_base() {
        let set = ArtifactSet::for_base(Path::new("/out/lesson.v2"));
        assert_eq!(set.transcript_path, Path::new("/out/lesson.v2.dialogo.txt"));
        assert_eq!(set.audio_path, Path::new("/out/lesson.v2.wav"));
        assert!(set.transcription_path.is_none());
    }

    #[test]
    fn keeps_safe_characters() {
        assert_eq!(sanitize_base_name("lesson-01_v2.final"), "lesson-01_v2.final");
        assert_eq!(sanitize_base_name("canción"), "canción");
    }

    #[test]
    fn collapses_unsafe_runs() {
        assert_eq!(sanitize_base_name("a  /\\ b"), "a_b");
        assert_eq!(sanitize_base_name("a_ b"), "a__b");
        assert_eq!(sanitize_base_name("x?*y"), "x_y");
    }

    #[test]
    fn cannot_escape_the_directory() {
        assert_eq!(sanitize_base_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_base_name(".hidden"), "hidden");
        assert_eq!(sanitize_base_name(".."), "");
    }

    #[test]
    fn empty_names_fall_back_to_timestamp() {
        let dir = Path::new("/out");
        for requested in [None, Some(""), Some("   "), Some("...")] {
            let base = resolve_output_base(dir, requested);
            assert_eq!(base.parent(), Some(dir));
            let name = base.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with("dialogue_"), "{name}");
            assert_eq!(name.len(), "dialogue_YYYYmmdd_HHMMSS".len());
        }
    }

    #[test]
    fn resolved_base_stays_in_dir() {
        let base = resolve_output_base(Path::new("/out"), Some("a/b"));
        assert_eq!(base, Path::new("/out/a_b"));
    }
}
