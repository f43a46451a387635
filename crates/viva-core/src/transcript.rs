//! Flat transcript decoding and encoding.
//!
//! Persisted conversations are stored one turn per line with a speaker label:
//!
//! ```text
//! Tutor: What happens when low equals high?
//! Student: the loop stops
//! ```
//!
//! Lines without a recognized label, blank lines, and labels with no content
//! are dropped. Decoding never fails.

use crate::entities::ConversationTurn;
use crate::enums::Speaker;

const TUTOR_LABEL: &str = "Tutor:";
const STUDENT_LABEL: &str = "Student:";

/// Parse a flat transcript into ordered conversation turns.
#[must_use]
pub fn parse_transcript(text: &str) -> Vec<ConversationTurn> {
    text.lines().filter_map(parse_line).collect()
}

/// Decode one line, or `None` if it is unlabeled or empty after the label.
fn parse_line(line: &str) -> Option<ConversationTurn> {
    let line = line.trim();
    let (speaker, rest) = if let Some(rest) = line.strip_prefix(TUTOR_LABEL) {
        (Speaker::Tutor, rest)
    } else if let Some(rest) = line.strip_prefix(STUDENT_LABEL) {
        (Speaker::Student, rest)
    } else {
        return None;
    };

    let content = rest.trim();
    if content.is_empty() {
        return None;
    }

    Some(ConversationTurn {
        speaker,
        text: content.to_string(),
    })
}

/// Render turns back into the `Label: text` line format.
///
/// Multi-line turn text is flattened onto a single line so the output parses
/// back into the same number of turns.
#[must_use]
pub fn render_transcript(turns: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        let flattened = turn.text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flattened.is_empty() {
            continue;
        }
        out.push_str(turn.speaker.label());
        out.push_str(": ");
        out.push_str(&flattened);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_transcript_yields_no_turns() {
        assert!(parse_transcript("").is_empty());
        assert!(parse_transcript("   \n\n  ").is_empty());
    }

    #[test]
    fn labels_must_lead_the_line() {
        let turns = parse_transcript("said the Tutor: hello");
        assert!(turns.is_empty());
    }

    #[test]
    fn indented_labels_are_accepted() {
        let turns = parse_transcript("   Student:   loop forever   ");
        assert_eq!(turns, vec![ConversationTurn::student("loop forever")]);
    }

    #[test]
    fn render_skips_blank_turns_and_flattens_newlines() {
        let turns = vec![
            ConversationTurn::tutor("line one\nline two"),
            ConversationTurn::student("   "),
            ConversationTurn::student("ok"),
        ];
        assert_eq!(
            render_transcript(&turns),
            "Tutor: line one line two\nStudent: ok\n"
        );
    }
}
