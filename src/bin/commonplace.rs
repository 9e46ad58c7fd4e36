//! CLI binary for commonplace.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `SamplerConfig`, picks a notifier, and either runs once or hands
//! control to the scheduler until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use commonplace::{
    build_extractor, run_once, DesktopNotifier, Notifier, NullNotifier, RunOutcome, SamplerConfig,
    Scheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Sample every 3 hours from the current directory (default)
  commonplace

  # A specific shelf, hourly
  commonplace --books-dir ~/books --interval-minutes 60

  # One run right now, no daemon
  commonplace --once --books-dir ~/books

  # Headless (cron, server): skip desktop notifications
  commonplace --once --no-notify

ENVIRONMENT VARIABLES:
  BOOKS_DIR               Directory scanned for .pdf files
  LOGS_DIR                Directory receiving YYYY-MM-DD.md logs
  INTERVAL_MINUTES        Minutes between runs (default 180)
  COMMONPLACE_MODEL       Model ID (default gpt-4.1-nano)
  COMMONPLACE_PROVIDER    Provider: openai, anthropic, gemini, ollama, …
  OPENAI_API_KEY          OpenAI API key (other providers: their own vars)

SETUP:
  1. Set an API key:  export OPENAI_API_KEY=sk-...
  2. Start the loop:  commonplace --books-dir ~/books

Each successful run appends one entry to logs/<date>.md and raises a
desktop notification with the quote."#;

/// Periodically sample your PDF library for quotes worth keeping.
#[derive(Parser, Debug)]
#[command(
    name = "commonplace",
    version,
    about = "Periodically sample your PDF library for quotes worth keeping",
    long_about = "Every few hours, pick a random PDF book, sample a short passage, ask a \
language model to extract a quote and a reflection, and append the result to a per-day \
Markdown log with a desktop notification.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing your .pdf books (non-recursive).
    #[arg(long, env = "BOOKS_DIR", default_value = ".")]
    books_dir: PathBuf,

    /// Directory receiving the per-day Markdown logs.
    #[arg(long, env = "LOGS_DIR", default_value = "logs")]
    logs_dir: PathBuf,

    /// Minutes between scheduled runs.
    #[arg(long, env = "INTERVAL_MINUTES", default_value_t = 180,
          value_parser = clap::value_parser!(u64).range(1..))]
    interval_minutes: u64,

    /// Model ID (e.g. gpt-4.1-nano, claude-haiku-4-20250514).
    #[arg(long, env = "COMMONPLACE_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama, azure.
    /// Auto-detected from API key env vars if not set.
    #[arg(long, env = "COMMONPLACE_PROVIDER")]
    provider: Option<String>,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "COMMONPLACE_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Model attempts per run before giving up on the day.
    #[arg(long, env = "COMMONPLACE_MAX_ATTEMPTS", default_value_t = 6)]
    max_attempts: u32,

    /// Run once and exit instead of starting the scheduler.
    #[arg(long)]
    once: bool,

    /// Suppress desktop notifications (headless/cron use).
    #[arg(long, env = "COMMONPLACE_NO_NOTIFY")]
    no_notify: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = SamplerConfig::builder()
        .books_dir(&cli.books_dir)
        .logs_dir(&cli.logs_dir)
        .interval_minutes(cli.interval_minutes)
        .temperature(cli.temperature)
        .max_model_attempts(cli.max_attempts);
    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    let config = builder.build().context("Invalid configuration")?;

    let extractor = build_extractor(&config).context("Failed to configure the LLM provider")?;
    let notifier: Arc<dyn Notifier> = if cli.no_notify {
        Arc::new(NullNotifier)
    } else {
        Arc::new(DesktopNotifier)
    };

    // ── Single run ───────────────────────────────────────────────────────
    if cli.once {
        let mut rng = StdRng::from_entropy();
        let outcome = run_once(&config, &extractor, notifier.as_ref(), &mut rng)
            .await
            .context("Run failed")?;
        match outcome {
            RunOutcome::Logged { book, log_path, .. } => {
                eprintln!("Logged a quote from '{book}' to {}", log_path.display());
            }
            RunOutcome::NoBooks => eprintln!("No books found in {}", config.books_dir.display()),
            RunOutcome::NoFragment { book } => {
                eprintln!("No usable fragment found in '{book}'");
            }
            RunOutcome::AttemptsExhausted { book, attempts } => {
                eprintln!("Model skipped '{book}' {attempts} times; nothing logged");
            }
        }
        return Ok(());
    }

    // ── Scheduler loop ───────────────────────────────────────────────────
    let handle = Scheduler::new(config, Arc::new(extractor), notifier).start();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    eprintln!("Shutting down…");
    handle.shutdown().await;

    Ok(())
}
