//! CLI module for the countdown timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `session`: Interactive session reading commands from stdin
//! - `wait`: One-shot countdown that exits on completion

pub mod commands;
pub mod display;
pub mod session;
pub mod wait;

pub use commands::{Cli, Commands, TimerArgs, WaitArgs};
pub use display::Display;
pub use session::{Flow, Session, SessionCommand};
pub use wait::run_until_complete;
