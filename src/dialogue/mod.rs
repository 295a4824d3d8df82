//! Dialogue text: everything that happens to the words before they are spoken.
//!
//! * [`style`]: dialect / CEFR-level instruction fragments and language labels.
//! * [`prompt`]: the full generation instruction sent to the text model.
//! * [`sanitize`]: strips code fences and normalises newlines in model output.
//!
//! ```rust
//! use dialogue_audio::dialogue::{build_prompt, clean_dialogue};
//!
//! let prompt = build_prompt("weather", "en", Some("en-GB"), Some("A2"), 320);
//! assert!(prompt.contains("British English"));
//!
//! let text = clean_dialogue("```text\nAna: Hi!\nLuis: Hello!\n```");
//! assert_eq!(text, "Ana: Hi!\nLuis: Hello!");
//! ```

pub mod prompt;
pub mod sanitize;
pub mod style;

/// First fixed speaker of every dialogue.
pub const SPEAKER_A: &str = "Ana";
/// Second fixed speaker of every dialogue.
pub const SPEAKER_B: &str = "Luis";

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use prompt::build_prompt;
pub use sanitize::clean_dialogue;
pub use style::{dialect_hint, language_label, level_hint, style_hint};
