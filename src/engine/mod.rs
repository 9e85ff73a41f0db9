//! Countdown engine module.
//!
//! This module contains the core countdown functionality:
//! - `timer`: Countdown engine with state transitions and the tick task
//! - `form`: Set-timer form that applies a pending input to the engine
//! - `error`: Engine error types

pub mod error;
pub mod form;
pub mod timer;

pub use error::EngineError;
pub use form::{FormAction, FormOutcome, TimerForm, REPLACE_RUNNING_PROMPT};
pub use timer::{CountdownEngine, TimerEvent};
