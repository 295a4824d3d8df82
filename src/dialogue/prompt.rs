//! Prompt composer for the text-generation call.
//!
//! The prompt is one string made of six fragments, in order:
//!
//! 1. what to write (language label, the two speakers, the topic)
//! 2. line format: only `Ana:` / `Luis:` turns, no narrator
//! 3. tone
//! 4. style hints (dialect, CEFR level), omitted when empty
//! 5. target length in words
//! 6. turn length

use super::style::{language_label, style_hint};
use super::{SPEAKER_A, SPEAKER_B};

/// Build the generation instruction for one dialogue.
///
/// Pure function.  The topic is embedded verbatim, except that control
/// characters other than whitespace (NUL, ESC, ...) become spaces.
///
/// ```
/// use dialogue_audio::dialogue::build_prompt;
///
/// let prompt = build_prompt("ordering coffee", "es", None, None, 300);
/// assert!(prompt.contains("in Spanish"));
/// assert!(prompt.contains("ordering coffee"));
/// assert!(prompt.contains("~300 words"));
/// ```
pub fn build_prompt(
    topic: &str,
    language: &str,
    dialect: Option<&str>,
    level: Option<&str>,
    target_word_count: u32,
) -> String {
    let topic = fold_control_chars(topic);
    let style = style_hint(dialect, level);

    let mut prompt = String::with_capacity(512);
    prompt.push_str(&format!(
        "Write an educational dialogue in {} between {SPEAKER_A} and {SPEAKER_B} about: {topic}. ",
        language_label(language),
    ));
    prompt.push_str(&format!(
        "Only lines starting with '{SPEAKER_A}:' or '{SPEAKER_B}:'. No narrator. "
    ));
    prompt.push_str("Friendly, clear, podcast pace. ");
    if !style.is_empty() {
        prompt.push_str(&style);
        prompt.push(' ');
    }
    prompt.push_str(&format!("Target length ~{target_word_count} words. "));
    prompt.push_str("Avoid long paragraphs; use turns of 1–3 sentences.");
    prompt
}

fn fold_control_chars(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && !c.is_whitespace() { ' ' } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
