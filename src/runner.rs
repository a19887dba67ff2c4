//! Drives countdowns against real time.
//!
//! The state machine in [`crate::timer`] is pure; this module supplies the
//! repeating one-second delay, the rendering surface, and the one-shot
//! expiry effects. A surface that has been detached from its view is never
//! rendered to or removed; ticks that observe a detached surface stop the
//! loop without side effects.

use std::time::Duration;

use chrono::Utc;
use console::{style, Term};
use log::{debug, info};
use terminal_size::{terminal_size, Width};
use tokio::time::interval;

use crate::{Countdown, CountdownState, Result, TickOutcome, TimerPosition, ViewMode, Workspace};

/// Where a countdown renders itself.
pub trait TimerSurface {
    /// Whether the surface is still part of a live view.
    fn is_attached(&self) -> bool;

    /// Updates the visible remaining time.
    fn render(&mut self, display: &str) -> Result<()>;

    /// Removes the visual element. Called at most once.
    fn remove(&mut self) -> Result<()>;
}

/// Performs the expiry effects: remove the element, and when `auto_read` is
/// set, ask the workspace to switch the active view to reading mode. With a
/// detached surface nothing happens at all.
pub fn finish_expired<S: TimerSurface>(
    surface: &mut S,
    workspace: &mut Workspace,
    auto_read: bool,
) -> Result<()> {
    if !surface.is_attached() {
        return Ok(());
    }
    surface.remove()?;
    if auto_read {
        workspace.set_view_mode(ViewMode::Reading);
    }
    Ok(())
}

/// Runs one countdown to completion: render once per second, expire once,
/// stop. Returns the final observed state (still `Pending` when the surface
/// detached mid-run).
pub async fn drive_countdown<S: TimerSurface>(
    countdown: &mut Countdown,
    surface: &mut S,
    workspace: &mut Workspace,
    auto_read: bool,
) -> Result<CountdownState> {
    let mut ticker = interval(Duration::from_secs(1));

    loop {
        ticker.tick().await;

        if !surface.is_attached() {
            debug!("Countdown surface detached, stopping");
            return Ok(countdown.state());
        }

        match countdown.tick(Utc::now()) {
            TickOutcome::Render(display) => surface.render(&display)?,
            TickOutcome::Expire => {
                info!("Countdown expired at {}", countdown.deadline());
                finish_expired(surface, workspace, auto_read)?;
                return Ok(CountdownState::Expired);
            }
            TickOutcome::Idle => return Ok(CountdownState::Expired),
        }
    }
}

/// Renders a countdown on one terminal line, aligned per the configured
/// position against the current terminal width.
pub struct TerminalSurface {
    term: Term,
    position: TimerPosition,
    attached: bool,
}

impl TerminalSurface {
    pub fn new(position: TimerPosition) -> Self {
        TerminalSurface {
            term: Term::stdout(),
            position,
            attached: true,
        }
    }

    fn aligned(&self, display: &str) -> String {
        let Some((Width(width), _)) = terminal_size() else {
            return display.to_string();
        };
        let pad = match self.position {
            TimerPosition::Left => 0,
            TimerPosition::Center => (width as usize).saturating_sub(display.len()) / 2,
            TimerPosition::Right => (width as usize).saturating_sub(display.len()),
        };
        format!("{}{}", " ".repeat(pad), display)
    }
}

impl TimerSurface for TerminalSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn render(&mut self, display: &str) -> Result<()> {
        // Align on the plain text; styling would inflate the measured width.
        let aligned = self.aligned(display);
        self.term.clear_line()?;
        self.term.write_str(&style(aligned).bold().to_string())?;
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        self.term.clear_line()?;
        self.attached = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingSurface {
        attached: bool,
        renders: Vec<String>,
        removals: usize,
    }

    impl RecordingSurface {
        fn attached() -> Self {
            RecordingSurface {
                attached: true,
                ..RecordingSurface::default()
            }
        }
    }

    impl TimerSurface for RecordingSurface {
        fn is_attached(&self) -> bool {
            self.attached
        }

        fn render(&mut self, display: &str) -> Result<()> {
            self.renders.push(display.to_string());
            Ok(())
        }

        fn remove(&mut self) -> Result<()> {
            self.removals += 1;
            self.attached = false;
            Ok(())
        }
    }

    fn open_workspace() -> Workspace {
        let mut workspace = Workspace::new();
        workspace.open(PathBuf::from("a.md"), "");
        workspace
    }

    #[test]
    fn expiry_removes_and_switches_to_reading_mode() {
        let mut surface = RecordingSurface::attached();
        let mut workspace = open_workspace();

        finish_expired(&mut surface, &mut workspace, true).unwrap();

        assert_eq!(surface.removals, 1);
        assert_eq!(workspace.active_view().unwrap().mode, ViewMode::Reading);
    }

    #[test]
    fn expiry_without_auto_read_leaves_the_view_mode_alone() {
        let mut surface = RecordingSurface::attached();
        let mut workspace = open_workspace();

        finish_expired(&mut surface, &mut workspace, false).unwrap();

        assert_eq!(surface.removals, 1);
        assert_eq!(workspace.active_view().unwrap().mode, ViewMode::Editing);
    }

    #[test]
    fn detached_surface_is_never_removed() {
        let mut surface = RecordingSurface::default();
        let mut workspace = open_workspace();

        finish_expired(&mut surface, &mut workspace, true).unwrap();

        assert_eq!(surface.removals, 0);
        assert_eq!(workspace.active_view().unwrap().mode, ViewMode::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn drive_stops_without_effects_when_the_surface_detaches() {
        let now = Utc::now();
        let mut countdown = Countdown::new(now + ChronoDuration::seconds(60), now).unwrap();
        let mut surface = RecordingSurface::default();
        let mut workspace = open_workspace();

        let state = drive_countdown(&mut countdown, &mut surface, &mut workspace, true)
            .await
            .unwrap();

        assert_eq!(state, CountdownState::Pending);
        assert!(surface.renders.is_empty());
        assert_eq!(surface.removals, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drive_renders_then_expires_exactly_once() {
        let now = Utc::now();
        let mut countdown = Countdown::new(now + ChronoDuration::milliseconds(30), now).unwrap();
        let mut surface = RecordingSurface::attached();
        let mut workspace = open_workspace();

        let state = drive_countdown(&mut countdown, &mut surface, &mut workspace, true)
            .await
            .unwrap();

        assert_eq!(state, CountdownState::Expired);
        assert!(!surface.renders.is_empty());
        assert!(surface.renders.iter().all(|r| r == "00:00"));
        assert_eq!(surface.removals, 1);
        assert_eq!(workspace.active_view().unwrap().mode, ViewMode::Reading);
    }
}
