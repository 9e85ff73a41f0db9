//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Hours/minutes/seconds values with per-field bounds
//! - The countdown state machine and its derived button predicates
//! - Timer configuration with validation

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// TimeField
// ============================================================================

/// One of the three fields of an [`Hms`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    /// Hours (0-99)
    Hours,
    /// Minutes (0-59)
    Minutes,
    /// Seconds (0-59)
    Seconds,
}

impl TimeField {
    /// All fields, most significant first.
    pub const ALL: [TimeField; 3] = [TimeField::Hours, TimeField::Minutes, TimeField::Seconds];

    /// Returns the largest value the field accepts.
    pub fn max(&self) -> u8 {
        match self {
            TimeField::Hours => 99,
            TimeField::Minutes | TimeField::Seconds => 59,
        }
    }

    /// Returns the label shown next to the field's input.
    pub fn label(&self) -> &'static str {
        match self {
            TimeField::Hours => "Hours",
            TimeField::Minutes => "Minutes",
            TimeField::Seconds => "Seconds",
        }
    }

    /// Clamps an arbitrary value into the field's range.
    pub fn clamp(&self, value: u32) -> u8 {
        // bounded by max() <= 99, so the cast is lossless
        value.min(u32::from(self.max())) as u8
    }

    fn check(&self, value: u64) -> Result<u8, TimeParseError> {
        if value > u64::from(self.max()) {
            return Err(TimeParseError::OutOfRange {
                field: *self,
                max: self.max(),
                value,
            });
        }
        Ok(value as u8)
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeField::Hours => f.write_str("hours"),
            TimeField::Minutes => f.write_str("minutes"),
            TimeField::Seconds => f.write_str("seconds"),
        }
    }
}

// ============================================================================
// TimeParseError
// ============================================================================

/// Errors produced when building an [`Hms`] strictly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// No text was given.
    #[error("duration is empty")]
    Empty,

    /// More than three `:`-separated parts.
    #[error("expected SS, MM:SS or HH:MM:SS but found {0} parts")]
    TooManyParts(usize),

    /// A part was not a non-negative integer.
    #[error("{field} is not a number: {text:?}")]
    NotANumber {
        /// Field the text was meant for
        field: TimeField,
        /// Offending text
        text: String,
    },

    /// A part exceeded the field's bound.
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        /// Field that overflowed
        field: TimeField,
        /// Largest accepted value
        max: u8,
        /// Value that was given
        value: u64,
    },
}

// ============================================================================
// Hms
// ============================================================================

/// An hours/minutes/seconds value.
///
/// Used both for the configured input duration and for the live remaining
/// time. Every constructor keeps the fields inside their bounds
/// (hours 0-99, minutes and seconds 0-59).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "HmsParts")]
pub struct Hms {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

#[derive(Deserialize)]
struct HmsParts {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TryFrom<HmsParts> for Hms {
    type Error = TimeParseError;

    fn try_from(parts: HmsParts) -> Result<Self, Self::Error> {
        Hms::new(parts.hours, parts.minutes, parts.seconds)
    }
}

impl Hms {
    /// 00:00:00
    pub const ZERO: Hms = Hms {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Creates a value, rejecting any field outside its bound.
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self, TimeParseError> {
        Ok(Self {
            hours: TimeField::Hours.check(hours.into())?,
            minutes: TimeField::Minutes.check(minutes.into())?,
            seconds: TimeField::Seconds.check(seconds.into())?,
        })
    }

    /// Creates a value, clamping each field into its bound.
    pub fn clamped(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours: TimeField::Hours.clamp(hours),
            minutes: TimeField::Minutes.clamp(minutes),
            seconds: TimeField::Seconds.clamp(seconds),
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Returns the value of a single field.
    pub fn get(&self, field: TimeField) -> u8 {
        match field {
            TimeField::Hours => self.hours,
            TimeField::Minutes => self.minutes,
            TimeField::Seconds => self.seconds,
        }
    }

    /// Returns a copy with one field replaced.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `value` exceeds the field's bound.
    pub fn with(mut self, field: TimeField, value: u8) -> Result<Self, TimeParseError> {
        let value = field.check(value.into())?;
        match field {
            TimeField::Hours => self.hours = value,
            TimeField::Minutes => self.minutes = value,
            TimeField::Seconds => self.seconds = value,
        }
        Ok(self)
    }

    /// Returns true for 00:00:00.
    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Returns the value as a number of seconds.
    pub fn total_seconds(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }

    /// Returns the value as a [`Duration`].
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.total_seconds()))
    }

    /// Subtracts one second, borrowing from minutes and then hours.
    ///
    /// 00:00:00 maps to itself.
    pub fn decrement(self) -> Self {
        if self.seconds > 0 {
            Self {
                seconds: self.seconds - 1,
                ..self
            }
        } else if self.minutes > 0 {
            Self {
                minutes: self.minutes - 1,
                seconds: 59,
                ..self
            }
        } else if self.hours > 0 {
            Self {
                hours: self.hours - 1,
                minutes: 59,
                seconds: 59,
            }
        } else {
            self
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

impl FromStr for Hms {
    type Err = TimeParseError;

    /// Parses `SS`, `MM:SS` or `HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let parts: Vec<&str> = s.split(':').collect();
        let fields: &[TimeField] = match parts.len() {
            1 => &[TimeField::Seconds],
            2 => &[TimeField::Minutes, TimeField::Seconds],
            3 => &TimeField::ALL,
            n => return Err(TimeParseError::TooManyParts(n)),
        };

        let mut hms = Hms::ZERO;
        for (field, text) in fields.iter().zip(parts) {
            let value: u64 = text
                .trim()
                .parse()
                .map_err(|_| TimeParseError::NotANumber {
                    field: *field,
                    text: text.to_string(),
                })?;
            hms = hms.with(*field, field.check(value)?)?;
        }
        Ok(hms)
    }
}

// ============================================================================
// RunState
// ============================================================================

/// Where the countdown is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Nothing left to count; never started or reset
    Idle,
    /// Tick loop active
    Running,
    /// Stopped by the user with time left
    Paused,
    /// Reached zero while running
    Completed,
}

impl RunState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Completed => "completed",
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

// ============================================================================
// PrimaryLabel
// ============================================================================

/// Label of the start/pause/resume button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryLabel {
    Start,
    Pause,
    Resume,
}

impl PrimaryLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryLabel::Start => "Start",
            PrimaryLabel::Pause => "Pause",
            PrimaryLabel::Resume => "Resume",
        }
    }
}

// ============================================================================
// RestartPolicy / CountdownConfig
// ============================================================================

/// What `restart` does after reseeding the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Leave the timer paused until the user starts it again
    Pause,
    /// Start counting immediately
    AutoResume,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        RestartPolicy::Pause
    }
}

/// Lower bound for the tick period in milliseconds.
pub const MIN_TICK_PERIOD_MS: u64 = 1;

/// Upper bound for the tick period in milliseconds.
pub const MAX_TICK_PERIOD_MS: u64 = 60_000;

/// Configuration for the countdown engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Time between ticks in milliseconds (1-60000)
    pub tick_period_ms: u64,
    /// Behaviour of `restart`
    pub restart_policy: RestartPolicy,
    /// Ring the terminal bell on completion
    pub bell: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 1000,
            restart_policy: RestartPolicy::Pause,
            bell: true,
        }
    }
}

impl CountdownConfig {
    /// Creates a new configuration with the specified tick period.
    pub fn with_tick_period_ms(mut self, millis: u64) -> Self {
        self.tick_period_ms = millis;
        self
    }

    /// Creates a new configuration with the specified restart policy.
    pub fn with_restart_policy(mut self, policy: RestartPolicy) -> Self {
        self.restart_policy = policy;
        self
    }

    /// Creates a new configuration with the bell switched on or off.
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    /// Returns the tick period as a [`Duration`].
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_TICK_PERIOD_MS..=MAX_TICK_PERIOD_MS).contains(&self.tick_period_ms) {
            return Err(format!(
                "tick period must be between {} and {} ms, got {}",
                MIN_TICK_PERIOD_MS, MAX_TICK_PERIOD_MS, self.tick_period_ms
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Result of [`TimerState::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Counting began from a freshly seeded remaining time
    Started(Hms),
    /// Counting continued from the time left at pause
    Resumed(Hms),
    /// Already running; nothing changed
    AlreadyRunning,
    /// Input is 00:00:00; nothing changed
    NothingToCount,
}

impl StartOutcome {
    /// Returns true if the state moved into `Running`.
    pub fn began_counting(&self) -> bool {
        matches!(self, StartOutcome::Started(_) | StartOutcome::Resumed(_))
    }
}

/// Result of [`TimerState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off; carries the new remaining time
    Counted(Hms),
    /// Remaining was already zero; the timer is now `Completed`
    Completed(Hms),
    /// Not running; nothing changed
    NotRunning,
}

/// Current state of the countdown.
///
/// Holds the configured input, the live remaining time, the run state and
/// the transient just-restarted flag. All transitions are plain methods with
/// no timer or I/O attached, so the engine can drive them from its tick task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Configured target duration
    pub input: Hms,
    /// Live countdown value
    pub remaining: Hms,
    /// Lifecycle state
    pub run_state: RunState,
    /// Set by restart, cleared by the next start or tick
    pub just_restarted: bool,
}

impl TimerState {
    /// Creates an idle state with zero input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input duration. The remaining time is left alone.
    pub fn configure(&mut self, input: Hms) {
        self.input = input;
    }

    /// Starts or resumes counting.
    ///
    /// With nothing remaining the input is copied into the remaining time
    /// first; a paused timer keeps the time it had left.
    pub fn start(&mut self) -> StartOutcome {
        if self.run_state == RunState::Running {
            return StartOutcome::AlreadyRunning;
        }

        let resuming = !self.remaining.is_zero();
        let candidate = if resuming { self.remaining } else { self.input };
        if candidate.is_zero() {
            return StartOutcome::NothingToCount;
        }

        let outcome = if resuming && self.run_state == RunState::Paused && !self.just_restarted {
            StartOutcome::Resumed(candidate)
        } else {
            StartOutcome::Started(candidate)
        };

        self.remaining = candidate;
        self.run_state = RunState::Running;
        self.just_restarted = false;
        outcome
    }

    /// Stops counting. Returns false if the timer was not running.
    ///
    /// Pausing on the tick that reached 00:00:00 leaves nothing to resume,
    /// so the state becomes `Idle` instead of `Paused`.
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = if self.remaining.is_zero() {
            RunState::Idle
        } else {
            RunState::Paused
        };
        true
    }

    /// Reseeds the remaining time from the input and waits for a start.
    ///
    /// A zero input leaves nothing to pause on, so the state becomes `Idle`.
    pub fn restart(&mut self) {
        self.remaining = self.input;
        self.just_restarted = true;
        self.run_state = if self.remaining.is_zero() {
            RunState::Idle
        } else {
            RunState::Paused
        };
    }

    /// Replaces the input and prepares a fresh start from it, discarding any
    /// time left on the current run.
    pub fn relaunch(&mut self, input: Hms) -> StartOutcome {
        self.input = input;
        self.remaining = Hms::ZERO;
        self.run_state = RunState::Idle;
        self.just_restarted = false;
        self.start()
    }

    /// Clears input and remaining time and goes back to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advances the countdown by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.run_state != RunState::Running {
            return TickOutcome::NotRunning;
        }

        self.just_restarted = false;
        if self.remaining.is_zero() {
            self.run_state = RunState::Completed;
            return TickOutcome::Completed(self.input);
        }

        self.remaining = self.remaining.decrement();
        TickOutcome::Counted(self.remaining)
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.run_state == RunState::Completed
    }

    /// Label of the start/pause/resume button.
    pub fn primary_label(&self) -> PrimaryLabel {
        if self.just_restarted {
            return PrimaryLabel::Start;
        }
        match self.run_state {
            RunState::Running => PrimaryLabel::Pause,
            RunState::Paused => PrimaryLabel::Resume,
            RunState::Idle | RunState::Completed => PrimaryLabel::Start,
        }
    }

    /// Whether the start/pause/resume button is disabled.
    pub fn is_primary_disabled(&self) -> bool {
        self.is_completed() || self.input.is_zero()
    }

    /// Whether the restart button is disabled (nothing to restart to).
    pub fn is_restart_disabled(&self) -> bool {
        self.remaining == self.input
    }
}

// ============================================================================
// Tests
// ============================================================================
