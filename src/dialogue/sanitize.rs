//! Cleanup of raw model output before it becomes the transcript.
//!
//! Models sometimes wrap the dialogue in a fenced code block:
//!
//! ~~~text
//! ```text            ← opening fence line, removed
//! Ana: Hola.
//! Luis: ¿Qué tal?
//! ```                ← closing fence line, removed
//! ~~~

const FENCE: &str = "```";

/// Strip fence lines, normalise CRLF to LF and trim.
///
/// Every step only removes characters, and the whole pass repeats until the
/// text stops changing, so the function is idempotent:
/// `clean_dialogue(&clean_dialogue(x)) == clean_dialogue(x)`.  Text without
/// fences only has its line endings and outer whitespace touched.
///
/// An empty result means the model produced nothing usable.
pub fn clean_dialogue(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    loop {
        let next = clean_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

/// One round of CRLF folding, fence stripping and trimming.
fn clean_pass(text: &str) -> String {
    // "\r\r\n" folds to a fresh "\r\n", hence the outer loop.
    let text = text.replace("\r\n", "\n");
    let text = strip_leading_fence(text.trim()).trim();
    strip_trailing_fence(text).trim().to_string()
}

/// Drop the first line when it opens a fence (e.g. ```` ```text ````).
fn strip_leading_fence(text: &str) -> &str {
    if !text.starts_with(FENCE) {
        return text;
    }
    match text.find('\n') {
        Some(idx) => &text[idx + 1..],
        None => "",
    }
}

/// Drop the last line when it is a bare closing fence.
fn strip_trailing_fence(text: &str) -> &str {
    match text.rfind('\n') {
        Some(idx) if text[idx + 1..].trim() == FENCE => &text[..idx],
        None if text.trim() == FENCE => "",
        _ => text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DIALOGUE: &str = "Ana: Hola.\nLuis: ¿Qué tal?";

    fn assert_idempotent(input: &str) {
        let once = clean_dialogue(input);
        assert_eq!(clean_dialogue(&once), once, "input {input:?}");
    }

    // ---- Fence removal -----------------------------------------------------

    #[test]
    fn removes_fence_with_language_tag() {
        let raw = format!("```text\n{DIALOGUE}\n```");
        assert_eq!(clean_dialogue(&raw), DIALOGUE);
    }

    #[test]
    fn removes_bare_fence_pair() {
        let raw = format!("```\n{DIALOGUE}\n```\n");
        assert_eq!(clean_dialogue(&raw), DIALOGUE);
    }

    #[test]
    fn removes_only_leading_fence_when_unclosed() {
        let raw = format!("```\n{DIALOGUE}");
        assert_eq!(clean_dialogue(&raw), DIALOGUE);
    }

    #[test]
    fn removes_only_trailing_fence_when_unopened() {
        let raw = format!("{DIALOGUE}\n```");
        assert_eq!(clean_dialogue(&raw), DIALOGUE);
    }

    #[test]
    fn inner_backticks_survive() {
        let raw = "```\nAna: Type `ls` here.\nLuis: ```ok```\n```";
        assert_eq!(
            clean_dialogue(raw),
            "Ana: Type `ls` here.\nLuis: ```ok```"
        );
    }

    #[test]
    fn no_fence_is_noop() {
        assert_eq!(clean_dialogue(DIALOGUE), DIALOGUE);
    }

    // ---- Newlines and whitespace -------------------------------------------

    #[test]
    fn normalises_crlf() {
        let raw = "```\r\nAna: Hola.\r\nLuis: ¿Qué tal?\r\n```\r\n";
        assert_eq!(clean_dialogue(raw), DIALOGUE);
    }

    #[test]
    fn crlf_exposed_by_folding_is_folded_too() {
        assert_eq!(clean_dialogue("Ana: a\r\r\nLuis: b"), "Ana: a\nLuis: b");
        assert_eq!(clean_dialogue("\nA\r\r\nA"), "A\nA");
    }

    #[test]
    fn trims_outer_whitespace() {
        let raw = format!("\n\n  {DIALOGUE}  \n\n");
        assert_eq!(clean_dialogue(&raw), DIALOGUE);
    }

    // ---- Empty results -----------------------------------------------------

    #[test]
    fn empty_input_gives_empty() {
        assert_eq!(clean_dialogue(""), "");
        assert_eq!(clean_dialogue("  \r\n "), "");
    }

    #[test]
    fn only_fences_gives_empty() {
        assert_eq!(clean_dialogue("```\n```"), "");
        assert_eq!(clean_dialogue("```json\n\n```\n"), "");
        assert_eq!(clean_dialogue("```"), "");
    }

    // ---- Idempotence -------------------------------------------------------

    #[test]
    fn idempotent_over_assorted_inputs() {
        let inputs = [
            "",
            "```",
            "```\n```\nAna: Hi",
            "Ana: Hi\n```\n```",
            "```md\r\nAna: Hi\r\n```",
            "\r\n```\r\n\r\n```\r\n",
            "Ana: a\r\nLuis: b",
            "Ana: a\r\r\nLuis: b",
            "\nA\r\r\nA",
            "```\r\r\nAna: a\r\r\r\n```",
            "  ``` \n x \n ``` ",
            DIALOGUE,
        ];
        for input in inputs {
            assert_idempotent(input);
        }
    }
}
