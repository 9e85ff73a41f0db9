//! Countdown engine.
//!
//! This module provides the core timer functionality:
//! - State transitions (Idle → Running ⇄ Paused → Completed)
//! - A single tick task driven by `tokio::time::interval_at`
//! - Event firing for the presentation layer and completion alerts
//! - Restart policy (stay paused or resume immediately)

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::error::EngineError;
use crate::types::{
    CountdownConfig, Hms, RestartPolicy, StartOutcome, TickOutcome, TimerState,
};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the display and completion alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Input duration changed
    Configured {
        /// New input duration
        input: Hms,
    },
    /// Counting began from a freshly seeded remaining time
    Started {
        /// Remaining time at start
        remaining: Hms,
    },
    /// Counting continued after a pause
    Resumed {
        /// Remaining time at resume
        remaining: Hms,
    },
    /// Counting stopped by the user
    Paused {
        /// Remaining time at pause
        remaining: Hms,
    },
    /// Remaining time reseeded from the input
    Restarted {
        /// Remaining time after reseeding
        remaining: Hms,
    },
    /// Everything cleared back to zero
    Reset,
    /// One tick elapsed
    Tick {
        /// Remaining time after the tick
        remaining: Hms,
    },
    /// Countdown reached zero. Sent exactly once per completion.
    Completed {
        /// Input duration that finished
        input: Hms,
    },
}

// ============================================================================
// Shared state
// ============================================================================

/// State shared between the engine and its tick task.
///
/// `generation` identifies the tick task allowed to mutate `state`. Every
/// transition that stops or replaces counting bumps it, so a task that has
/// been aborted but not yet dropped can never tick again.
#[derive(Debug, Default)]
struct Shared {
    state: TimerState,
    generation: u64,
}

impl Shared {
    fn retire_ticker(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn current_runtime() -> Result<Handle, EngineError> {
    Handle::try_current().map_err(|_| EngineError::NoRuntime)
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Countdown engine that owns the timer state and its tick task.
///
/// At most one tick task is alive at any time. Operations that begin counting
/// (`start`, `toggle`, `configure_and_start`, and `restart` under
/// [`RestartPolicy::AutoResume`]) must be called from within a tokio runtime.
pub struct CountdownEngine {
    /// State shared with the tick task
    shared: Arc<Mutex<Shared>>,
    /// Engine configuration
    config: CountdownConfig,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Handle of the current tick task
    ticker: Option<JoinHandle<()>>,
}

impl CountdownEngine {
    /// Creates a new idle engine with the given configuration and event channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: CountdownConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        Ok(Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            config,
            event_tx,
            ticker: None,
        })
    }

    /// Sets the input duration, clamping each field into its bound.
    ///
    /// A running countdown keeps its remaining time until the next
    /// start or restart.
    pub fn configure(&mut self, hours: u32, minutes: u32, seconds: u32) -> Result<()> {
        self.configure_duration(Hms::clamped(hours, minutes, seconds))
    }

    /// Sets the input duration from an already validated value.
    pub fn configure_duration(&mut self, input: Hms) -> Result<()> {
        lock(&self.shared).state.configure(input);
        debug!(%input, "input configured");
        self.emit(TimerEvent::Configured { input })
    }

    /// Starts or resumes the countdown.
    ///
    /// Does nothing if already running or if there is nothing to count.
    ///
    /// # Errors
    ///
    /// Returns an error outside a tokio runtime or if the event channel is closed.
    pub fn start(&mut self) -> Result<()> {
        let runtime = current_runtime()?;

        let (outcome, generation) = {
            let mut shared = lock(&self.shared);
            let outcome = shared.state.start();
            let generation = if outcome.began_counting() {
                shared.retire_ticker()
            } else {
                shared.generation
            };
            (outcome, generation)
        };

        self.after_start(outcome, generation, &runtime)
    }

    /// Pauses a running countdown. Does nothing otherwise.
    pub fn pause(&mut self) -> Result<()> {
        let remaining = {
            let mut shared = lock(&self.shared);
            if !shared.state.pause() {
                None
            } else {
                shared.retire_ticker();
                Some(shared.state.remaining)
            }
        };

        let Some(remaining) = remaining else {
            debug!("pause ignored: not running");
            return Ok(());
        };

        self.abort_ticker();
        info!(%remaining, "countdown paused");
        self.emit(TimerEvent::Paused { remaining })
    }

    /// Pauses if running, otherwise starts or resumes.
    pub fn toggle(&mut self) -> Result<()> {
        if self.snapshot().is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Reseeds the remaining time from the input.
    ///
    /// Under [`RestartPolicy::Pause`] the timer is left paused and the user
    /// has to start it again; under [`RestartPolicy::AutoResume`] counting
    /// begins immediately.
    pub fn restart(&mut self) -> Result<()> {
        let runtime = match self.config.restart_policy {
            RestartPolicy::AutoResume => Some(current_runtime()?),
            RestartPolicy::Pause => None,
        };

        let remaining = {
            let mut shared = lock(&self.shared);
            shared.state.restart();
            shared.retire_ticker();
            shared.state.remaining
        };

        self.abort_ticker();
        info!(%remaining, policy = ?self.config.restart_policy, "countdown restarted");
        let restarted = self.emit(TimerEvent::Restarted { remaining });

        // the policy applies even when the event could not be delivered
        let resumed = match runtime {
            Some(runtime) => {
                let (outcome, generation) = {
                    let mut shared = lock(&self.shared);
                    let outcome = shared.state.start();
                    (outcome, shared.retire_ticker())
                };
                self.after_start(outcome, generation, &runtime)
            }
            None => Ok(()),
        };

        restarted.and(resumed)
    }

    /// Clears input and remaining time and stops counting.
    pub fn reset(&mut self) -> Result<()> {
        {
            let mut shared = lock(&self.shared);
            shared.state.reset();
            shared.retire_ticker();
        }

        self.abort_ticker();
        info!("countdown reset");
        self.emit(TimerEvent::Reset)
    }

    /// Replaces the input and starts counting it from the top, discarding
    /// whatever time was left.
    pub fn configure_and_start(&mut self, input: Hms) -> Result<()> {
        let runtime = current_runtime()?;

        let (outcome, generation) = {
            let mut shared = lock(&self.shared);
            let outcome = shared.state.relaunch(input);
            (outcome, shared.retire_ticker())
        };

        self.abort_ticker();
        self.emit(TimerEvent::Configured { input })?;
        self.after_start(outcome, generation, &runtime)
    }

    /// Returns a copy of the current timer state.
    pub fn snapshot(&self) -> TimerState {
        lock(&self.shared).state.clone()
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    /// Returns true while a tick task is alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the tick task without touching the state.
    ///
    /// Called when the hosting view goes away.
    pub fn shutdown(&mut self) {
        lock(&self.shared).retire_ticker();
        self.abort_ticker();
        debug!("engine shut down");
    }

    fn after_start(
        &mut self,
        outcome: StartOutcome,
        generation: u64,
        runtime: &Handle,
    ) -> Result<()> {
        match outcome {
            StartOutcome::Started(remaining) => {
                self.spawn_ticker(generation, runtime);
                info!(%remaining, "countdown started");
                self.emit(TimerEvent::Started { remaining })
            }
            StartOutcome::Resumed(remaining) => {
                self.spawn_ticker(generation, runtime);
                info!(%remaining, "countdown resumed");
                self.emit(TimerEvent::Resumed { remaining })
            }
            StartOutcome::AlreadyRunning => {
                debug!("start ignored: already running");
                Ok(())
            }
            StartOutcome::NothingToCount => {
                debug!("start ignored: input is 00:00:00");
                Ok(())
            }
        }
    }

    /// Replaces the tick task with a fresh one bound to `generation`.
    fn spawn_ticker(&mut self, generation: u64, runtime: &Handle) {
        self.abort_ticker();

        let shared = Arc::clone(&self.shared);
        let event_tx = self.event_tx.clone();
        let period = self.config.tick_period();

        self.ticker = Some(runtime.spawn(run_ticker(shared, event_tx, period, generation)));
    }

    fn abort_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    fn emit(&self, event: TimerEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send timer event")
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        lock(&self.shared).retire_ticker();
        self.abort_ticker();
    }
}

/// Tick loop. Runs until the countdown completes, stops running, or a newer
/// generation takes over.
async fn run_ticker(
    shared: Arc<Mutex<Shared>>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    period: Duration,
    generation: u64,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let outcome = {
            let mut shared = lock(&shared);
            if shared.generation != generation {
                debug!(generation, "stale tick task exiting");
                return;
            }
            shared.state.tick()
        };

        let event = match outcome {
            TickOutcome::Counted(remaining) => {
                debug!(%remaining, "tick");
                TimerEvent::Tick { remaining }
            }
            TickOutcome::Completed(input) => {
                info!(%input, "countdown completed");
                TimerEvent::Completed { input }
            }
            TickOutcome::NotRunning => return,
        };

        let completed = matches!(event, TimerEvent::Completed { .. });
        if event_tx.send(event).is_err() {
            debug!("event receiver dropped; state keeps counting");
        }
        if completed {
            return;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
