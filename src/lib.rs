//! # commonplace
//!
//! Keep a commonplace book without keeping the habit: every few hours this
//! crate opens a random PDF from your bookshelf, samples a short passage,
//! asks a language model whether it is worth keeping, and appends the
//! resulting quote and reflection to a dated Markdown log — with a desktop
//! notification so the quote finds you, not the other way around.
//!
//! ## Pipeline Overview
//!
//! ```text
//! shelf
//!  │
//!  ├─ 1. Pick      one random .pdf from the books directory
//!  ├─ 2. Extract   best-effort text extraction (pdf-extract, spawn_blocking)
//!  ├─ 3. Normalize collapse whitespace/newline noise
//!  ├─ 4. Sample    random 3-paragraph windows, vetoed by the junk classifier
//!  ├─ 5. Model     up to 6 chat attempts: SKIP, or {quote, reflection} JSON
//!  └─ 6. Record    append to logs/YYYY-MM-DD.md + desktop notification
//! ```
//!
//! The interesting part is step 4: extracted PDF text is full of front
//! matter, indices, and tabular debris, and the junk classifier rejects
//! those for free before any model call is paid for.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use commonplace::{run_guarded, build_extractor, DesktopNotifier, SamplerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let config = SamplerConfig::builder().books_dir("~/books").build()?;
//!     let extractor = build_extractor(&config)?;
//!     run_guarded(&config, &extractor, &DesktopNotifier).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `commonplace` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! commonplace = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod journal;
pub mod library;
pub mod notify;
pub mod pipeline;
pub mod prompts;
pub mod run;
pub mod scheduler;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SamplerConfig, SamplerConfigBuilder, DEFAULT_MODEL};
pub use error::{CommonplaceError, RunOutcome};
pub use journal::{Journal, LogEntry};
pub use notify::{DesktopNotifier, Notifier, NullNotifier, RecordingNotifier};
pub use pipeline::extract::Document;
pub use pipeline::llm::{LlmQuoteExtractor, Quote, QuoteExtractor, QuoteOutcome};
pub use run::{build_extractor, run_guarded, run_once, sample_and_log};
pub use scheduler::{Scheduler, SchedulerHandle};
