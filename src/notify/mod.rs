//! Completion alerts.
//!
//! The engine emits a single `TimerEvent::Completed` per completion; front-ends
//! hand it to a [`CompletionNotifier`], which is what the user actually sees.
//!
//! - [`TerminalNotifier`]: writes the alert (optionally with a bell) to a writer
//! - [`MockNotifier`]: records alerts for tests

mod error;

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::types::Hms;

pub use error::NotifyError;

/// Text of the completion alert.
pub const COMPLETION_MESSAGE: &str = "Timer completed!";

/// Trait for completion alert implementations.
pub trait CompletionNotifier {
    /// Alerts the user that a countdown of `input` finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered.
    fn notify_completed(&self, input: Hms) -> Result<(), NotifyError>;
}

/// Writes the completion alert to a terminal stream.
pub struct TerminalNotifier<W: Write> {
    writer: Mutex<W>,
    bell: bool,
}

impl TerminalNotifier<io::Stdout> {
    /// Alerts on standard output.
    pub fn stdout(bell: bool) -> Self {
        Self::new(io::stdout(), bell)
    }
}

impl TerminalNotifier<io::Stderr> {
    /// Alerts on standard error.
    pub fn stderr(bell: bool) -> Self {
        Self::new(io::stderr(), bell)
    }
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(writer: W, bell: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            bell,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> CompletionNotifier for TerminalNotifier<W> {
    fn notify_completed(&self, input: Hms) -> Result<(), NotifyError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if self.bell {
            writer.write_all(b"\x07")?;
        }
        writeln!(writer, "{} ({})", COMPLETION_MESSAGE, input)?;
        writer.flush()?;
        debug!(%input, bell = self.bell, "completion alert written");
        Ok(())
    }
}

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    alerts: Mutex<Vec<Hms>>,
    should_fail: AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn get_alerts(&self) -> Vec<Hms> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CompletionNotifier for MockNotifier {
    fn notify_completed(&self, input: Hms) -> Result<(), NotifyError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifyError::Failed("Mock failure".to_string()));
        }
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(input);
        Ok(())
    }
}

impl<N: CompletionNotifier + ?Sized> CompletionNotifier for &N {
    fn notify_completed(&self, input: Hms) -> Result<(), NotifyError> {
        (**self).notify_completed(input)
    }
}
