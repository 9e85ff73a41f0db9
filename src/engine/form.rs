//! Set-timer form.
//!
//! Holds a pending input duration while the user edits it, then applies it
//! to the engine with either "apply and start" or "apply and return".

use anyhow::Result;
use tracing::{debug, info};

use super::timer::CountdownEngine;
use crate::types::{Hms, TimeField};

/// Prompt shown before replacing a running countdown.
pub const REPLACE_RUNNING_PROMPT: &str =
    "Starting a new timer will stop the current one. Continue?";

/// Button pressed on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Apply the pending input and start counting it
    ApplyAndStart,
    /// Leave without applying anything
    GoBack,
}

/// What happened when the form was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// Input applied and countdown running
    Started,
    /// Input applied but it is 00:00:00, so nothing is counting
    Applied,
    /// Pending input thrown away
    Discarded,
    /// The user declined to replace the running countdown
    Cancelled,
}

/// Pending input edited on the set-timer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerForm {
    pending: Hms,
}

impl TimerForm {
    pub fn new(initial: Hms) -> Self {
        Self { pending: initial }
    }

    /// Opens the form pre-filled with the engine's current input.
    pub fn from_engine(engine: &CountdownEngine) -> Self {
        Self::new(engine.snapshot().input)
    }

    pub fn pending(&self) -> Hms {
        self.pending
    }

    /// Applies typed text to a field.
    ///
    /// Empty text sets the field to 0. Otherwise the leading integer is read
    /// (`"12abc"` is 12, `"5.9"` is 5) and replaces the field if it is inside
    /// the field's range. Text without a leading integer, or a number out of
    /// range, keeps the previous value.
    pub fn enter(&mut self, field: TimeField, text: &str) -> u8 {
        let text = text.trim();
        if text.is_empty() {
            self.set(field, 0);
            return self.pending.get(field);
        }

        match leading_integer(text).map(u32::try_from) {
            Some(Ok(value)) => {
                if !self.set(field, value) {
                    debug!(%field, text, "entry out of range or unchanged");
                }
            }
            _ => debug!(%field, text, "entry ignored"),
        }
        self.pending.get(field)
    }

    /// Sets a field to a number. Out-of-range values are ignored.
    ///
    /// Returns true if the field changed.
    pub fn set(&mut self, field: TimeField, value: u32) -> bool {
        let Ok(value) = u8::try_from(value) else {
            return false;
        };
        match self.pending.with(field, value) {
            Ok(updated) => {
                let changed = updated != self.pending;
                self.pending = updated;
                changed
            }
            Err(_) => false,
        }
    }

    /// Applies the pending input without starting ("apply and return").
    pub fn apply(self, engine: &mut CountdownEngine) -> Result<()> {
        engine.configure_duration(self.pending)
    }

    /// Submits the form.
    ///
    /// `confirm` is only asked when "apply and start" would replace a running
    /// countdown; returning false leaves the engine untouched.
    pub fn submit<F>(
        self,
        engine: &mut CountdownEngine,
        action: FormAction,
        confirm: F,
    ) -> Result<FormOutcome>
    where
        F: FnOnce() -> bool,
    {
        match action {
            FormAction::GoBack => Ok(FormOutcome::Discarded),
            FormAction::ApplyAndStart => {
                if engine.snapshot().is_running() && !confirm() {
                    info!("replacing running countdown declined");
                    return Ok(FormOutcome::Cancelled);
                }

                engine.configure_and_start(self.pending)?;
                if engine.snapshot().is_running() {
                    Ok(FormOutcome::Started)
                } else {
                    Ok(FormOutcome::Applied)
                }
            }
        }
    }
}

/// Reads an optionally signed integer from the start of `text`.
fn leading_integer(text: &str) -> Option<i64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = text.len() - unsigned.len() + digits;
    text[..end].parse().ok()
}

// ============================================================================
// Tests
// ============================================================================
