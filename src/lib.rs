//! Countdown Timer Library
//!
//! This library provides the core functionality for the countdown CLI.
//! It includes:
//! - Type definitions for durations, timer state and configuration
//! - Countdown engine with a single tick task and completion events
//! - Set-timer form for editing and applying a new input
//! - Completion alerts
//! - CLI command parsing, display utilities and the interactive session

pub mod cli;
pub mod engine;
pub mod notify;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{
    CountdownEngine, EngineError, FormAction, FormOutcome, TimerEvent, TimerForm,
    REPLACE_RUNNING_PROMPT,
};
pub use notify::{
    CompletionNotifier, MockNotifier, NotifyError, TerminalNotifier, COMPLETION_MESSAGE,
};
pub use types::{
    CountdownConfig, Hms, PrimaryLabel, RestartPolicy, RunState, TimeField, TimeParseError,
    TimerState,
};
