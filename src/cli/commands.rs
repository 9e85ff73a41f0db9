//! Command definitions for the countdown CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::{CountdownConfig, Hms, RestartPolicy, MAX_TICK_PERIOD_MS, MIN_TICK_PERIOD_MS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "countdown",
    version,
    about = "Terminal countdown timer",
    long_about = "A countdown timer with start, pause, resume, restart and reset.\n\
                  Enter hours, minutes and seconds, start the countdown and get \
                  alerted when it reaches zero.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open an interactive countdown session
    Run(TimerArgs),

    /// Count down once and exit when the timer completes
    Wait(WaitArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Duration and behaviour shared by `run` and `wait`
#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// Duration as SS, MM:SS or HH:MM:SS
    #[arg(
        value_parser = parse_duration,
        conflicts_with_all = ["hours", "minutes", "seconds"]
    )]
    pub duration: Option<Hms>,

    /// Hours (values above 99 are clamped)
    #[arg(long, default_value_t = 0)]
    pub hours: u32,

    /// Minutes (values above 59 are clamped)
    #[arg(short, long, default_value_t = 0)]
    pub minutes: u32,

    /// Seconds (values above 59 are clamped)
    #[arg(short, long, default_value_t = 0)]
    pub seconds: u32,

    /// What restart does after reseeding the remaining time
    #[arg(short, long, value_enum, default_value_t = RestartPolicy::Pause)]
    pub restart_policy: RestartPolicy,

    /// Do not ring the terminal bell on completion
    #[arg(long)]
    pub no_bell: bool,

    /// Tick period in milliseconds
    #[arg(
        long,
        hide = true,
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(MIN_TICK_PERIOD_MS..=MAX_TICK_PERIOD_MS)
    )]
    pub tick_ms: u64,
}

impl Default for TimerArgs {
    fn default() -> Self {
        Self {
            duration: None,
            hours: 0,
            minutes: 0,
            seconds: 0,
            restart_policy: RestartPolicy::Pause,
            no_bell: false,
            tick_ms: 1000,
        }
    }
}

impl TimerArgs {
    /// Returns the requested input duration.
    ///
    /// The positional duration is already validated; the field flags are
    /// clamped into their bounds.
    pub fn input(&self) -> Hms {
        self.duration
            .unwrap_or_else(|| Hms::clamped(self.hours, self.minutes, self.seconds))
    }

    /// Builds the engine configuration from the flags.
    pub fn config(&self) -> CountdownConfig {
        CountdownConfig::default()
            .with_tick_period_ms(self.tick_ms)
            .with_restart_policy(self.restart_policy)
            .with_bell(!self.no_bell)
    }
}

/// Arguments for the wait command
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    #[command(flatten)]
    pub timer: TimerArgs,

    /// Print every event as a JSON line
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Parses a positional duration.
fn parse_duration(s: &str) -> Result<Hms, String> {
    s.parse::<Hms>().map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
