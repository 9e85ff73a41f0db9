//! Countdown Timer CLI
//!
//! Enter hours, minutes and seconds, start the countdown, pause, resume,
//! restart or reset it, and get alerted when it reaches zero.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use countdown::cli::{run_until_complete, Cli, Commands, Display, Session};
use countdown::notify::TerminalNotifier;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let config = args.config();
            let notifier = TerminalNotifier::stdout(config.bell);
            let mut session = Session::new(config, notifier)?;
            session.configure(args.input())?;
            session.run(BufReader::new(tokio::io::stdin())).await?;
        }
        Some(Commands::Wait(args)) => {
            let config = args.timer.config();
            let input = args.timer.input();
            if args.json {
                // keep stdout pure JSON lines
                let notifier = TerminalNotifier::stderr(config.bell);
                run_until_complete(config, input, true, &notifier).await?;
            } else {
                let notifier = TerminalNotifier::stdout(config.bell);
                run_until_complete(config, input, false, &notifier).await?;
            }
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
