//! Interactive countdown session.
//!
//! Reads line commands from an async reader, drives a [`CountdownEngine`],
//! renders the timer line after every event and alerts on completion.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::display::Display;
use crate::engine::{
    CountdownEngine, FormAction, FormOutcome, TimerEvent, TimerForm, REPLACE_RUNNING_PROMPT,
};
use crate::notify::CompletionNotifier;
use crate::types::{CountdownConfig, Hms};

// ============================================================================
// SessionCommand
// ============================================================================

/// A command typed into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Toggle,
    Restart,
    Reset,
    /// Apply a new input and start it
    Set(Hms),
    /// Apply a new input without starting
    Config(Hms),
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses one input line. An empty line is the primary button.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(SessionCommand::Toggle);
        };
        let argument = words.next();
        if words.next().is_some() {
            return Err(format!("too many arguments for '{}'", word));
        }

        let duration = |name: &str| -> Result<Hms, String> {
            let text = argument.ok_or_else(|| format!("usage: {} <DURATION>", name))?;
            text.parse::<Hms>().map_err(|e| e.to_string())
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "start" | "s" => SessionCommand::Start,
            "pause" | "p" => SessionCommand::Pause,
            "toggle" | "t" => SessionCommand::Toggle,
            "restart" | "r" => SessionCommand::Restart,
            "reset" => SessionCommand::Reset,
            "set" => SessionCommand::Set(duration("set")?),
            "config" => SessionCommand::Config(duration("config")?),
            "status" => SessionCommand::Status,
            "help" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            other => return Err(format!("unknown command '{}' (type 'help')", other)),
        };

        let takes_argument = matches!(command, SessionCommand::Set(_) | SessionCommand::Config(_));
        if argument.is_some() && !takes_argument {
            return Err(format!("'{}' takes no arguments", word));
        }
        Ok(command)
    }
}

/// Whether the session keeps going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ============================================================================
// Session
// ============================================================================

/// Interactive session around one engine.
pub struct Session<N: CompletionNotifier> {
    engine: CountdownEngine,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    notifier: N,
    /// Form waiting for a yes/no before replacing the running countdown
    awaiting_confirmation: Option<TimerForm>,
}

impl<N: CompletionNotifier> Session<N> {
    /// Creates a session with a fresh engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CountdownConfig, notifier: N) -> Result<Self> {
        let (event_tx, events) = mpsc::unbounded_channel();
        let engine = CountdownEngine::new(config, event_tx)?;

        Ok(Self {
            engine,
            events,
            notifier,
            awaiting_confirmation: None,
        })
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Returns true while a yes/no answer is expected.
    pub fn is_awaiting_confirmation(&self) -> bool {
        self.awaiting_confirmation.is_some()
    }

    /// Sets the initial input.
    pub fn configure(&mut self, input: Hms) -> Result<()> {
        self.engine.configure_duration(input)
    }

    /// Handles one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if let Some(form) = self.awaiting_confirmation.take() {
            let confirmed = matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes");
            if !confirmed {
                Display::show_cancelled();
                return Ok(Flow::Continue);
            }
            form.submit(&mut self.engine, FormAction::ApplyAndStart, || true)?;
            return Ok(Flow::Continue);
        }

        let command = match SessionCommand::parse(line) {
            Ok(command) => command,
            Err(message) => {
                Display::show_error(&message);
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "session command");

        match command {
            SessionCommand::Start => self.engine.start()?,
            SessionCommand::Pause => self.engine.pause()?,
            SessionCommand::Toggle => {
                if self.engine.snapshot().is_primary_disabled() {
                    debug!("primary button disabled");
                } else {
                    self.engine.toggle()?;
                }
            }
            SessionCommand::Restart => self.engine.restart()?,
            SessionCommand::Reset => self.engine.reset()?,
            SessionCommand::Set(input) => {
                let form = TimerForm::new(input);
                if self.engine.snapshot().is_running() {
                    Display::show_prompt(REPLACE_RUNNING_PROMPT);
                    self.awaiting_confirmation = Some(form);
                } else if form.submit(&mut self.engine, FormAction::ApplyAndStart, || true)?
                    == FormOutcome::Applied
                {
                    Display::show_applied(input);
                }
            }
            SessionCommand::Config(input) => {
                TimerForm::new(input).apply(&mut self.engine)?;
                Display::show_applied(input);
            }
            SessionCommand::Status => Display::show_state(&self.engine.snapshot()),
            SessionCommand::Help => Display::show_help(),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Handles one engine event: alerts on completion and redraws.
    pub fn handle_event(&mut self, event: TimerEvent) {
        if let TimerEvent::Completed { input } = event {
            if let Err(e) = self.notifier.notify_completed(input) {
                warn!("completion alert failed: {}", e);
            }
        }
        Display::show_state(&self.engine.snapshot());
    }

    /// Handles every event already queued.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    /// Runs the session until `quit`, end of input or Ctrl-C.
    pub async fn run<R>(mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        Display::show_state(&self.engine.snapshot());

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        debug!("end of input");
                        break;
                    };
                    if self.handle_line(&line)? == Flow::Quit {
                        break;
                    }
                }
                Some(event) = self.events.recv() => self.handle_event(event),
                _ = &mut ctrl_c => {
                    info!("interrupted");
                    break;
                }
            }
        }

        self.drain_events();
        self.engine.shutdown();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
