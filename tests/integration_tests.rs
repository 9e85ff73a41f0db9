//! Integration tests for the countdown engine.
//!
//! These tests drive the public engine API on a paused tokio clock:
//! - Counting down to completion
//! - Pause and resume
//! - Restart and reset
//! - Single tick task under rapid toggling

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use countdown::engine::{CountdownEngine, TimerEvent};
use countdown::types::{CountdownConfig, Hms, PrimaryLabel, RestartPolicy, RunState};

// ============================================================================
// Test Helpers
// ============================================================================

fn hms(h: u8, m: u8, s: u8) -> Hms {
    Hms::new(h, m, s).unwrap()
}

/// Creates an engine with the default one-second tick.
fn create_engine() -> (CountdownEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    create_engine_with_config(CountdownConfig::default())
}

fn create_engine_with_config(
    config: CountdownConfig,
) -> (CountdownEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let engine = CountdownEngine::new(config, tx).unwrap();
    (engine, rx)
}

/// Collects every event already queued.
fn drain(rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn ticks(events: &[TimerEvent]) -> Vec<Hms> {
    events
        .iter()
        .filter_map(|event| match event {
            TimerEvent::Tick { remaining } => Some(*remaining),
            _ => None,
        })
        .collect()
}

fn completions(events: &[TimerEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, TimerEvent::Completed { .. }))
        .count()
}

// ============================================================================
// Counting Down
// ============================================================================

/// Five seconds count down through every value and complete exactly once.
#[tokio::test(start_paused = true)]
async fn countdown_runs_to_completion() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 0, 5).unwrap();
    engine.start().unwrap();

    // five ticks reach zero, the sixth completes
    sleep(Duration::from_millis(6500)).await;

    let events = drain(&mut rx);
    assert_eq!(
        ticks(&events),
        vec![
            hms(0, 0, 4),
            hms(0, 0, 3),
            hms(0, 0, 2),
            hms(0, 0, 1),
            Hms::ZERO
        ]
    );
    assert_eq!(completions(&events), 1);

    let state = engine.snapshot();
    assert_eq!(state.run_state, RunState::Completed);
    assert!(state.is_primary_disabled());
    assert!(!state.is_restart_disabled());
}

/// Crossing a minute boundary borrows from the minutes field.
#[tokio::test(start_paused = true)]
async fn countdown_borrows_across_fields() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(1, 0, 0).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(1500)).await;

    assert_eq!(ticks(&drain(&mut rx)), vec![hms(0, 59, 59)]);
}

/// Starting with a zero input does nothing at all.
#[tokio::test(start_paused = true)]
async fn start_with_zero_input_is_ignored() {
    let (mut engine, mut rx) = create_engine();

    engine.start().unwrap();
    sleep(Duration::from_secs(3)).await;

    assert!(drain(&mut rx).is_empty());
    assert_eq!(engine.snapshot().run_state, RunState::Idle);
    assert!(!engine.is_ticking());
}

/// A fast tick period counts the same values.
#[tokio::test(start_paused = true)]
async fn fast_tick_period() {
    let config = CountdownConfig::default().with_tick_period_ms(10);
    let (mut engine, mut rx) = create_engine_with_config(config);
    engine.configure(0, 0, 3).unwrap();
    engine.start().unwrap();

    sleep(Duration::from_millis(45)).await;

    let events = drain(&mut rx);
    assert_eq!(ticks(&events).len(), 3);
    assert_eq!(completions(&events), 1);
}

// ============================================================================
// Pause and Resume
// ============================================================================

/// Pause freezes the remaining time; resume continues from it.
#[tokio::test(start_paused = true)]
async fn pause_and_resume_flow() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 0, 10).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(3500)).await;

    engine.pause().unwrap();
    let state = engine.snapshot();
    assert_eq!(state.remaining, hms(0, 0, 7));
    assert_eq!(state.primary_label(), PrimaryLabel::Resume);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(engine.snapshot().remaining, hms(0, 0, 7));
    drain(&mut rx);

    engine.start().unwrap();
    assert_eq!(
        drain(&mut rx),
        vec![TimerEvent::Resumed {
            remaining: hms(0, 0, 7)
        }]
    );
    assert_eq!(engine.snapshot().primary_label(), PrimaryLabel::Pause);

    sleep(Duration::from_millis(8500)).await;
    let events = drain(&mut rx);
    assert_eq!(ticks(&events).len(), 7);
    assert_eq!(completions(&events), 1);
}

/// Pausing after the last tick reached zero leaves nothing to resume.
#[tokio::test(start_paused = true)]
async fn pause_at_zero_goes_idle() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 0, 1).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(engine.snapshot().remaining, Hms::ZERO);
    drain(&mut rx);

    engine.pause().unwrap();

    let state = engine.snapshot();
    assert_eq!(state.run_state, RunState::Idle);
    assert_eq!(state.primary_label(), PrimaryLabel::Start);
    assert!(!engine.is_ticking());
    assert_eq!(
        drain(&mut rx),
        vec![TimerEvent::Paused {
            remaining: Hms::ZERO
        }]
    );

    sleep(Duration::from_secs(3)).await;
    assert_eq!(completions(&drain(&mut rx)), 0);

    engine.start().unwrap();
    assert_eq!(
        drain(&mut rx),
        vec![TimerEvent::Started {
            remaining: hms(0, 0, 1)
        }]
    );
}

/// Rapid toggling never leaves two tick tasks behind.
#[tokio::test(start_paused = true)]
async fn rapid_toggle_keeps_single_tick_task() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 1, 0).unwrap();

    for _ in 0..21 {
        engine.toggle().unwrap();
    }
    assert!(engine.snapshot().is_running());
    drain(&mut rx);

    sleep(Duration::from_millis(10_500)).await;

    assert_eq!(ticks(&drain(&mut rx)).len(), 10);
    assert_eq!(engine.snapshot().remaining, hms(0, 0, 50));
}

// ============================================================================
// Restart and Reset
// ============================================================================

/// Restart under the default policy reseeds and waits for start.
#[tokio::test(start_paused = true)]
async fn restart_then_start_counts_from_input() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 0, 10).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(4500)).await;

    engine.restart().unwrap();
    let state = engine.snapshot();
    assert_eq!(state.remaining, hms(0, 0, 10));
    assert_eq!(state.primary_label(), PrimaryLabel::Start);
    assert!(state.is_restart_disabled());
    drain(&mut rx);

    engine.start().unwrap();
    assert_eq!(
        drain(&mut rx),
        vec![TimerEvent::Started {
            remaining: hms(0, 0, 10)
        }]
    );

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(ticks(&drain(&mut rx)), vec![hms(0, 0, 9)]);
}

/// Restart under the auto-resume policy keeps counting.
#[tokio::test(start_paused = true)]
async fn restart_auto_resume_after_completion() {
    let config = CountdownConfig::default().with_restart_policy(RestartPolicy::AutoResume);
    let (mut engine, mut rx) = create_engine_with_config(config);
    engine.configure(0, 0, 2).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(3500)).await;
    assert!(engine.snapshot().is_completed());
    drain(&mut rx);

    engine.restart().unwrap();
    sleep(Duration::from_millis(3500)).await;

    let events = drain(&mut rx);
    assert_eq!(ticks(&events).len(), 2);
    assert_eq!(completions(&events), 1);
}

/// Reset clears everything and disables both buttons.
#[tokio::test(start_paused = true)]
async fn reset_while_running() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 2, 0).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(2500)).await;

    engine.reset().unwrap();
    drain(&mut rx);
    sleep(Duration::from_secs(5)).await;

    assert!(drain(&mut rx).is_empty());
    let state = engine.snapshot();
    assert_eq!(state.input, Hms::ZERO);
    assert_eq!(state.remaining, Hms::ZERO);
    assert!(state.is_primary_disabled());
    assert!(state.is_restart_disabled());
}

// ============================================================================
// Configure
// ============================================================================

/// Configuring while running does not disturb the remaining time.
#[tokio::test(start_paused = true)]
async fn configure_while_running_keeps_remaining() {
    let (mut engine, mut rx) = create_engine();
    engine.configure(0, 0, 30).unwrap();
    engine.start().unwrap();
    sleep(Duration::from_millis(1500)).await;

    engine.configure(0, 5, 0).unwrap();

    let state = engine.snapshot();
    assert_eq!(state.input, hms(0, 5, 0));
    assert_eq!(state.remaining, hms(0, 0, 29));
    assert!(state.is_running());

    sleep(Duration::from_secs(1)).await;
    assert_eq!(
        ticks(&drain(&mut rx)),
        vec![hms(0, 0, 29), hms(0, 0, 28)]
    );
}
