//! Display utilities for the countdown CLI.
//!
//! This module provides formatted output for:
//! - The timer line with its three buttons
//! - Event lines for the `wait` command (plain and JSON)
//! - Help, prompts and error messages

use anyhow::{Context, Result};

use crate::engine::TimerEvent;
use crate::types::{Hms, TimerState};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats the timer line: remaining time plus the three buttons.
    ///
    /// Disabled buttons are shown in parentheses instead of brackets.
    pub fn render(state: &TimerState) -> String {
        format!(
            "{}  {} {} {}",
            state.remaining,
            Self::button("Set Timer", false),
            Self::button(state.primary_label().as_str(), state.is_primary_disabled()),
            Self::button("Restart", state.is_restart_disabled()),
        )
    }

    /// Shows the timer line.
    pub fn show_state(state: &TimerState) {
        println!("{}", Self::render(state));
    }

    /// Formats a single event for the `wait` command.
    ///
    /// Returns `None` for events that have nothing to show.
    pub fn format_event(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::Started { remaining } => Some(format!("> started  {}", remaining)),
            TimerEvent::Resumed { remaining } => Some(format!("> resumed  {}", remaining)),
            TimerEvent::Paused { remaining } => Some(format!("|| paused  {}", remaining)),
            TimerEvent::Restarted { remaining } => Some(format!("<< restarted  {}", remaining)),
            TimerEvent::Tick { remaining } => Some(remaining.to_string()),
            TimerEvent::Reset => Some("[] reset".to_string()),
            TimerEvent::Configured { .. } | TimerEvent::Completed { .. } => None,
        }
    }

    /// Shows a single event as plain text.
    pub fn show_event(event: &TimerEvent) {
        if let Some(line) = Self::format_event(event) {
            println!("{}", line);
        }
    }

    /// Shows a single event as one JSON line.
    pub fn show_event_json(event: &TimerEvent) -> Result<()> {
        let json = serde_json::to_string(event).context("Failed to serialize timer event")?;
        println!("{}", json);
        Ok(())
    }

    /// Shows the session help.
    pub fn show_help() {
        println!("commands:");
        println!("  start            start or resume the countdown");
        println!("  pause            pause the countdown");
        println!("  toggle, <enter>  start/pause/resume button");
        println!("  restart          reseed the remaining time from the input");
        println!("  reset            clear the input and the remaining time");
        println!("  set <DURATION>   set the input and start counting it");
        println!("  config <DURATION> set the input without starting");
        println!("  status           show the timer");
        println!("  quit             leave the session");
        println!("DURATION is SS, MM:SS or HH:MM:SS");
    }

    /// Shows the confirmation prompt.
    pub fn show_prompt(question: &str) {
        println!("{} [y/N]", question);
    }

    /// Shows a notice that the pending input was applied without starting.
    pub fn show_applied(input: Hms) {
        println!("* input set to {}", input);
    }

    /// Shows a notice that a pending action was cancelled.
    pub fn show_cancelled() {
        println!("cancelled");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    fn button(label: &str, disabled: bool) -> String {
        if disabled {
            format!("({})", label)
        } else {
            format!("[{}]", label)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
