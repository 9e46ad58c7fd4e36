//! End-to-end tests for the sampling run, driven by a scripted extractor.
//!
//! No live model, no real PDFs: the document is synthetic prose and the
//! extractor replays a scripted sequence of outcomes, which makes the
//! attempt loop, the journal, and the notifications fully deterministic.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use commonplace::{
    sample_and_log, CommonplaceError, Document, Quote, QuoteExtractor, QuoteOutcome,
    RecordingNotifier, RunOutcome, SamplerConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test doubles ─────────────────────────────────────────────────────────

/// Replays a scripted sequence of outcomes and records every call.
struct ScriptedExtractor {
    replies: Mutex<VecDeque<Result<QuoteOutcome, CommonplaceError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedExtractor {
    fn new(replies: Vec<Result<QuoteOutcome, CommonplaceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteExtractor for ScriptedExtractor {
    async fn extract_quote(
        &self,
        book_name: &str,
        fragment: &str,
    ) -> Result<QuoteOutcome, CommonplaceError> {
        self.calls
            .lock()
            .unwrap()
            .push((book_name.to_string(), fragment.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("extractor called more times than scripted")
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

fn parsed(quote: &str, reflection: &str) -> Result<QuoteOutcome, CommonplaceError> {
    Ok(QuoteOutcome::Parsed(Quote {
        quote: quote.into(),
        reflection: reflection.into(),
    }))
}

/// Six paragraphs of clean prose, comfortably past the sampling minimums.
fn document() -> Document {
    let paragraph =
        "The slow light settled over the valley and nobody hurried to name it. ".repeat(7);
    Document {
        name: "Walden".to_string(),
        text: vec![paragraph.trim().to_string(); 6].join("\n\n"),
    }
}

fn config_in(dir: &std::path::Path) -> SamplerConfig {
    SamplerConfig::builder()
        .books_dir(dir)
        .logs_dir(dir.join("logs"))
        .build()
        .unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn skip_then_success_resends_the_same_fragment_and_logs_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let extractor = ScriptedExtractor::new(vec![Ok(QuoteOutcome::Skip), parsed("X", "Y")]);
    let notifier = RecordingNotifier::new();
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = sample_and_log(&document(), &config, &extractor, &notifier, &mut rng)
        .await
        .unwrap();

    // Logged on the second attempt.
    let RunOutcome::Logged {
        book,
        quote,
        log_path,
        ..
    } = outcome
    else {
        panic!("expected Logged, got something else");
    };
    assert_eq!(book, "Walden");
    assert_eq!(quote, "X");

    // The skip did not trigger a resample: both attempts saw the exact
    // same fragment, for the same book.
    let calls = extractor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(calls[0].0, "Walden");

    // Exactly one entry, in the literal Markdown template.
    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents.matches("## 🕒").count(), 1);
    assert!(contents.contains("— 📚 Walden"));
    assert!(contents.contains("   > X\n"));
    assert!(contents.contains("   _Y_\n"));
    assert!(contents.contains("   ---\n"));

    // One success notification carrying quote and reflection.
    let msgs = notifier.messages();
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].0.contains("Walden"));
    assert!(msgs[0].1.contains("X"));
    assert!(msgs[0].1.contains("Y"));
    assert!(msgs[0].1.contains(log_path.file_name().unwrap().to_str().unwrap()));
}

#[tokio::test]
async fn six_skips_exhaust_the_budget_without_logging() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let extractor = ScriptedExtractor::new((0..6).map(|_| Ok(QuoteOutcome::Skip)).collect());
    let notifier = RecordingNotifier::new();
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = sample_and_log(&document(), &config, &extractor, &notifier, &mut rng)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::AttemptsExhausted {
            book: "Walden".into(),
            attempts: 6,
        }
    );
    assert_eq!(extractor.calls().len(), 6);

    // Nothing was written.
    assert!(!dir.path().join("logs").exists());

    // A softer notification, not a success one.
    let msgs = notifier.messages();
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].1.contains("front matter"));
}

#[tokio::test]
async fn malformed_replies_consume_attempts_like_skips() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut replies: Vec<Result<QuoteOutcome, CommonplaceError>> =
        (0..5).map(|_| Ok(QuoteOutcome::Malformed)).collect();
    replies.push(parsed("Simplify.", "Less is more."));
    let extractor = ScriptedExtractor::new(replies);
    let notifier = RecordingNotifier::new();
    let mut rng = StdRng::seed_from_u64(11);

    let outcome = sample_and_log(&document(), &config, &extractor, &notifier, &mut rng)
        .await
        .unwrap();

    assert!(outcome.is_logged());
    assert_eq!(extractor.calls().len(), 6);
}

#[tokio::test]
async fn a_tiny_document_is_a_soft_no_fragment_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let extractor = ScriptedExtractor::new(vec![]);
    let notifier = RecordingNotifier::new();
    let mut rng = StdRng::seed_from_u64(11);

    let tiny = Document {
        name: "Pamphlet".to_string(),
        text: "Too small to sample.".to_string(),
    };
    let outcome = sample_and_log(&tiny, &config, &extractor, &notifier, &mut rng)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RunOutcome::NoFragment {
            book: "Pamphlet".into(),
        }
    );
    assert!(extractor.calls().is_empty(), "no model call was paid for");
    let msgs = notifier.messages();
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].1.contains("decent fragment"));
}

#[tokio::test]
async fn transport_errors_propagate_as_hard_failures() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let extractor = ScriptedExtractor::new(vec![Err(CommonplaceError::ModelRequest {
        message: "connection reset".into(),
    })]);
    let notifier = RecordingNotifier::new();
    let mut rng = StdRng::seed_from_u64(11);

    let err = sample_and_log(&document(), &config, &extractor, &notifier, &mut rng)
        .await
        .unwrap_err();

    assert!(matches!(err, CommonplaceError::ModelRequest { .. }));
    // The orchestrator itself stays silent; run_guarded owns error reporting.
    assert!(notifier.messages().is_empty());
}
