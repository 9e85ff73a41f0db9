//! One-shot countdown for scripts.

use anyhow::{bail, Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::display::Display;
use crate::engine::{CountdownEngine, TimerEvent};
use crate::notify::CompletionNotifier;
use crate::types::{CountdownConfig, Hms};

/// Counts `input` down once, printing every event, and returns when it
/// completes.
///
/// # Errors
///
/// Returns an error if `input` is zero, if the countdown is interrupted with
/// Ctrl-C, or if an event cannot be written.
pub async fn run_until_complete<N>(
    config: CountdownConfig,
    input: Hms,
    json: bool,
    notifier: &N,
) -> Result<()>
where
    N: CompletionNotifier + ?Sized,
{
    if input.is_zero() {
        bail!("nothing to count down: duration is {}", input);
    }

    let (event_tx, mut events) = mpsc::unbounded_channel();
    let mut engine = CountdownEngine::new(config, event_tx)?;
    engine.configure_duration(input)?;
    engine.start().context("Failed to start countdown")?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    bail!("countdown stopped before completing");
                };

                if json {
                    Display::show_event_json(&event)?;
                } else {
                    Display::show_event(&event);
                }

                if let TimerEvent::Completed { input } = event {
                    if let Err(e) = notifier.notify_completed(input) {
                        warn!("completion alert failed: {}", e);
                    }
                    debug!("wait finished");
                    return Ok(());
                }
            }
            _ = &mut ctrl_c => {
                engine.shutdown();
                bail!("interrupted at {}", engine.snapshot().remaining);
            }
        }
    }
}
