//! Initial content for new notes.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::{Settings, TIMER_BLOCK_TAG};

/// Tag line prepended to new notes when enabled.
pub const NOTE_TAG: &str = "#ObjectWriter";

/// Builds the initial body of a new note from the settings record.
///
/// The pieces are appended in a fixed order: the tag line (plus one blank
/// line), then the countdown block whose deadline is `created_at` plus the
/// configured duration, then the optional rule, then a blank-line spacer.
/// With neither flag set the body is empty.
pub fn build_note_content(settings: &Settings, created_at: DateTime<Utc>) -> String {
    let mut content = String::new();

    if settings.add_tag {
        content.push_str(NOTE_TAG);
        content.push_str("\n\n");
    }

    if settings.add_timer {
        let deadline = created_at + Duration::seconds(i64::from(settings.timer_duration));
        content.push_str("```");
        content.push_str(TIMER_BLOCK_TAG);
        content.push('\n');
        // Whole seconds with a Z suffix, so the instant re-parses exactly.
        content.push_str(&deadline.to_rfc3339_opts(SecondsFormat::Secs, true));
        content.push_str("\n```\n");
        if settings.timer_add_rule {
            content.push_str("\n---\n");
        }
        content.push('\n');
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract_countdown_blocks, parse_deadline};
    use chrono::TimeZone;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn settings(add_tag: bool, add_timer: bool, add_rule: bool) -> Settings {
        Settings {
            add_tag,
            add_timer,
            timer_add_rule: add_rule,
            ..Settings::default()
        }
    }

    #[test]
    fn no_flags_builds_an_empty_note() {
        assert_eq!(build_note_content(&settings(false, false, false), created_at()), "");
    }

    #[test]
    fn tag_only_is_the_tag_line_plus_one_blank_line() {
        let content = build_note_content(&settings(true, false, false), created_at());
        assert_eq!(content, "#ObjectWriter\n\n");
    }

    #[test]
    fn timer_block_carries_the_shifted_deadline() {
        let content = build_note_content(&settings(false, true, false), created_at());
        assert_eq!(content, "```countdown\n2024-06-01T12:05:00Z\n```\n\n");
    }

    #[test]
    fn rule_follows_the_block_and_a_blank_line_follows_the_rule() {
        let content = build_note_content(&settings(true, true, true), created_at());
        assert_eq!(
            content,
            "#ObjectWriter\n\n```countdown\n2024-06-01T12:05:00Z\n```\n\n---\n\n"
        );
    }

    #[test]
    fn emitted_timestamp_round_trips_to_the_same_instant() {
        let mut custom = settings(false, true, false);
        custom.timer_duration = 90;
        let content = build_note_content(&custom, created_at());

        let blocks = extract_countdown_blocks(&content);
        assert_eq!(blocks.len(), 1);

        let deadline = parse_deadline(&blocks[0]).unwrap();
        assert_eq!(deadline, created_at() + Duration::seconds(90));
    }
}
