//! Countdown timer state machine and embedded block protocol.
//!
//! A countdown block is a fenced code block tagged `countdown` whose body is
//! a single RFC 3339 instant, the moment the timer expires. The block is the
//! wire format between note creation (producer) and this module (consumer);
//! it round-trips through persisted documents, so a timer re-derives all of
//! its state from the body every time the document is rendered.

use chrono::{DateTime, Duration, Utc};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// Fence tag marking a countdown block.
pub const TIMER_BLOCK_TAG: &str = "countdown";

/// Observable state of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// The target instant is still ahead.
    Pending,
    /// The target instant has passed; terminal.
    Expired,
}

/// What a tick asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Show the remaining time and schedule another tick.
    Render(String),
    /// The countdown just expired; perform the one-shot expiry effects and
    /// stop rescheduling. Reported exactly once.
    Expire,
    /// The countdown had already expired; nothing to do.
    Idle,
}

/// A live countdown toward an absolute target instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    deadline: DateTime<Utc>,
    state: CountdownState,
}

impl Countdown {
    /// Creates a countdown toward `deadline`. A deadline already in the past
    /// at render time yields no countdown at all.
    pub fn new(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Option<Countdown> {
        if deadline < now {
            return None;
        }
        Some(Countdown {
            deadline,
            state: CountdownState::Pending,
        })
    }

    /// Creates a countdown from a block body. A body that does not parse is
    /// treated the same as a past deadline: no timer, no error.
    pub fn from_block(body: &str, now: DateTime<Utc>) -> Option<Countdown> {
        Countdown::new(parse_deadline(body)?, now)
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Advances the countdown against the current instant.
    ///
    /// While pending, yields the remaining time to render. The transition to
    /// expired happens on the first tick that observes a negative remainder
    /// and is reported exactly once; later ticks are idle.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.state == CountdownState::Expired {
            return TickOutcome::Idle;
        }

        let remaining = self.deadline - now;
        if remaining < Duration::zero() {
            self.state = CountdownState::Expired;
            TickOutcome::Expire
        } else {
            TickOutcome::Render(format_remaining(remaining))
        }
    }
}

/// Parses a countdown block body: exactly one timestamp line, optionally
/// surrounded by whitespace.
pub fn parse_deadline(body: &str) -> Option<DateTime<Utc>> {
    let line = body.trim();
    if line.is_empty() || line.contains('\n') {
        return None;
    }
    DateTime::parse_from_rfc3339(line)
        .ok()
        .map(|deadline| deadline.with_timezone(&Utc))
}

/// Renders a remaining duration as zero-padded `minutes:seconds`.
pub fn format_remaining(remaining: Duration) -> String {
    let ms = remaining.num_milliseconds().max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Collects the bodies of all countdown blocks in a Markdown document, in
/// document order. Fenced blocks with any other tag are ignored.
pub fn extract_countdown_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut body: Option<String> = None;

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info.split_whitespace().next() == Some(TIMER_BLOCK_TAG) =>
            {
                body = Some(String::new());
            }
            Event::Text(text) => {
                if let Some(body) = body.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(body) = body.take() {
                    blocks.push(body);
                }
            }
            _ => {}
        }
    }

    blocks
}
