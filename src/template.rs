//! Note-name templating.
//!
//! Names for new notes come from a user-configurable template holding the
//! placeholders `{{date}}`, `{{time}}`, and `{{object}}`. Each placeholder
//! is substituted once, at its first occurrence; later occurrences stay
//! literal.

use std::fmt::Write;

use chrono::{DateTime, Local};

/// Renders a note name from the template and the three substitution values.
pub fn render_note_name(template: &str, date: &str, time: &str, object: &str) -> String {
    template
        .replacen("{{date}}", date, 1)
        .replacen("{{time}}", time, 1)
        .replacen("{{object}}", object, 1)
}

/// Formats `now` with a strftime format string. A format the formatter
/// rejects is passed through verbatim as the value rather than surfaced as
/// an error.
pub fn format_timestamp(now: &DateTime<Local>, format: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", now.format(format)) {
        Ok(()) => out,
        Err(_) => format.to_string(),
    }
}
