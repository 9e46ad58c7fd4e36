//! The run orchestrator: one complete sampling cycle.
//!
//! A run walks `pick book → extract → select fragment → model attempts →
//! journal + notify`. Soft dead-ends (empty shelf, no usable fragment,
//! model skipping everything) are [`RunOutcome`] variants with their own
//! notifications; hard failures propagate as [`CommonplaceError`] and are
//! converted to an error notification by [`run_guarded`], never letting a
//! single bad run take the scheduler down.

use std::sync::Arc;

use edgequake_llm::{LLMProvider, ProviderFactory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::{SamplerConfig, DEFAULT_MODEL};
use crate::error::{CommonplaceError, RunOutcome};
use crate::journal::{Journal, LogEntry};
use crate::library::{pick_book, scan_books};
use crate::notify::Notifier;
use crate::pipeline::extract::{extract_document, Document};
use crate::pipeline::llm::{LlmQuoteExtractor, QuoteExtractor, QuoteOutcome};
use crate::pipeline::select::select_fragment;

/// Title used for every notification this tool raises.
const NOTIFY_TITLE: &str = "Commonplace";

/// Execute one complete run.
///
/// The RNG drives both the book pick and the fragment sampling; inject a
/// seeded one for deterministic tests.
pub async fn run_once<R: Rng + ?Sized>(
    config: &SamplerConfig,
    extractor: &dyn QuoteExtractor,
    notifier: &dyn Notifier,
    rng: &mut R,
) -> Result<RunOutcome, CommonplaceError> {
    // ── Step 1: Pick a book ──────────────────────────────────────────────
    let books = scan_books(&config.books_dir)?;
    let Some(book_path) = pick_book(&books, rng) else {
        info!("No books in {}", config.books_dir.display());
        notifier.notify(
            NOTIFY_TITLE,
            &format!("No PDF books found in {}", config.books_dir.display()),
        );
        return Ok(RunOutcome::NoBooks);
    };
    info!("Tonight's book: {}", book_path.display());

    // ── Step 2: Extract text ─────────────────────────────────────────────
    let document = extract_document(book_path).await?;

    // ── Step 3..5: Sample, query, log ────────────────────────────────────
    sample_and_log(&document, config, extractor, notifier, rng).await
}

/// Sample a fragment from an already-extracted document and drive the
/// model attempt loop through to a journal entry or a soft outcome.
pub async fn sample_and_log<R: Rng + ?Sized>(
    document: &Document,
    config: &SamplerConfig,
    extractor: &dyn QuoteExtractor,
    notifier: &dyn Notifier,
    rng: &mut R,
) -> Result<RunOutcome, CommonplaceError> {
    // ── Select a fragment ────────────────────────────────────────────────
    let Some(fragment) = select_fragment(&document.text, rng) else {
        info!("No usable fragment in '{}'", document.name);
        notifier.notify(
            NOTIFY_TITLE,
            &format!("Couldn't extract a decent fragment from '{}'", document.name),
        );
        return Ok(RunOutcome::NoFragment {
            book: document.name.clone(),
        });
    };
    info!(
        "Sampled a {}-char fragment from '{}'",
        fragment.chars().count(),
        document.name
    );

    // ── Model attempt loop ───────────────────────────────────────────────
    // The SAME fragment is re-sent on every attempt; skip and malformed
    // replies only consume attempts, they never trigger a resample.
    for attempt in 1..=config.max_model_attempts {
        match extractor.extract_quote(&document.name, &fragment).await? {
            QuoteOutcome::Skip => {
                info!(
                    "Attempt {}/{}: model skipped the fragment",
                    attempt, config.max_model_attempts
                );
            }
            QuoteOutcome::Malformed => {
                warn!(
                    "Attempt {}/{}: unparseable model reply",
                    attempt, config.max_model_attempts
                );
            }
            QuoteOutcome::Parsed(quote) => {
                let journal = Journal::new(&config.logs_dir);
                let entry =
                    LogEntry::now(document.name.as_str(), quote.quote.as_str(), quote.reflection.as_str());
                let log_path = journal.append(&entry)?;

                notifier.notify(
                    &format!("{NOTIFY_TITLE} — {}", document.name),
                    &format!(
                        "“{}”\n\n{}\n\nLogged to {}",
                        quote.quote,
                        quote.reflection,
                        log_path.display()
                    ),
                );
                return Ok(RunOutcome::Logged {
                    book: document.name.clone(),
                    quote: quote.quote,
                    reflection: quote.reflection,
                    log_path,
                });
            }
        }
    }

    // ── Attempts exhausted ───────────────────────────────────────────────
    info!(
        "All {} attempts skipped for '{}'",
        config.max_model_attempts, document.name
    );
    notifier.notify(
        NOTIFY_TITLE,
        &format!(
            "Nothing quotable in '{}' today — all front matter, it seems",
            document.name
        ),
    );
    Ok(RunOutcome::AttemptsExhausted {
        book: document.name.clone(),
        attempts: config.max_model_attempts,
    })
}

/// Run once, converting any hard failure into an error notification.
///
/// This is the containment boundary the scheduler relies on: nothing that
/// happens inside a run may terminate the process or the timer. Returns
/// `None` when the run failed hard.
pub async fn run_guarded(
    config: &SamplerConfig,
    extractor: &dyn QuoteExtractor,
    notifier: &dyn Notifier,
) -> Option<RunOutcome> {
    let mut rng = StdRng::from_entropy();
    match run_once(config, extractor, notifier, &mut rng).await {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!("Run failed: {e}");
            notifier.notify(&format!("{NOTIFY_TITLE} — error"), &e.to_string());
            None
        }
    }
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`) — the caller constructed
///    and configured it entirely; used as-is (tests, custom middleware).
/// 2. **Named provider + model** (`config.provider_name`) — reads the
///    corresponding API key from the environment via `ProviderFactory`.
/// 3. **Full auto-detection** (`ProviderFactory::from_env`) — scans known
///    API key variables and picks the first available provider.
pub fn resolve_provider(
    config: &SamplerConfig,
) -> Result<Arc<dyn LLMProvider>, CommonplaceError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return ProviderFactory::create_llm_provider(name, model).map_err(|e| {
            CommonplaceError::ProviderNotConfigured {
                provider: name.clone(),
                hint: format!("{e}"),
            }
        });
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| CommonplaceError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}

/// Build the production extractor from the config's provider settings.
pub fn build_extractor(
    config: &SamplerConfig,
) -> Result<LlmQuoteExtractor, CommonplaceError> {
    let provider = resolve_provider(config)?;
    Ok(LlmQuoteExtractor::new(provider, config))
}
