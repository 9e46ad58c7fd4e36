//! Error types for the commonplace library.
//!
//! Two distinct types reflect two distinct kinds of "nothing was logged":
//!
//! * [`CommonplaceError`] — **Hard failure**: something in the run's
//!   infrastructure broke (unreadable books directory, corrupt PDF, model
//!   transport error, journal write failure). Returned as
//!   `Err(CommonplaceError)` from [`crate::run::run_once`].
//!
//! * [`RunOutcome`] — **Expected end states**: an empty library, a document
//!   with no quotable fragment, or a model that judged every attempt
//!   unusable. These are ordinary results of a run, reported through a
//!   soft notification rather than an error path.
//!
//! The separation keeps the scheduler honest: a hard failure is surfaced as
//! an error notification and the loop keeps ticking; a soft outcome is not
//! an error at all.

use std::path::PathBuf;
use thiserror::Error;

/// All hard failures returned by the commonplace library.
///
/// Expected per-run end states use [`RunOutcome`] instead.
#[derive(Debug, Error)]
pub enum CommonplaceError {
    // ── Library errors ────────────────────────────────────────────────────
    /// The books directory could not be read at all.
    #[error("Cannot read books directory '{path}': {source}\nCheck the path exists and is readable.")]
    BooksDirUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A selected book could not be read from disk.
    #[error("Failed to read book '{path}': {source}")]
    BookUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// pdf-extract failed, or produced no text at all.
    #[error("Text extraction failed for '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    // ── Model errors ──────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The model API call itself failed (network, auth, rate limit).
    ///
    /// Parse failures and the skip sentinel are NOT transport errors; they
    /// consume an attempt in the orchestrator loop instead.
    #[error("Model request failed: {message}")]
    ModelRequest { message: String },

    // ── Journal errors ────────────────────────────────────────────────────
    /// Could not create or append to the per-day log file.
    #[error("Failed to write log file '{path}': {source}")]
    JournalWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The end state of one complete run.
///
/// Only [`RunOutcome::Logged`] wrote anything; the other variants are soft
/// outcomes the user hears about through a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No `.pdf` files were found in the books directory.
    NoBooks,
    /// The chosen book yielded no usable fragment within the sampling budget.
    NoFragment { book: String },
    /// The model returned skip/malformed replies for every attempt.
    AttemptsExhausted { book: String, attempts: u32 },
    /// A quote was extracted, journalled, and announced.
    Logged {
        book: String,
        quote: String,
        reflection: String,
        log_path: PathBuf,
    },
}

impl RunOutcome {
    /// True when the run ended with a journal entry.
    pub fn is_logged(&self) -> bool {
        matches!(self, RunOutcome::Logged { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failed_display() {
        let e = CommonplaceError::ExtractionFailed {
            path: PathBuf::from("shelf/novel.pdf"),
            detail: "unexpected EOF".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("novel.pdf"), "got: {msg}");
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn provider_not_configured_display() {
        let e = CommonplaceError::ProviderNotConfigured {
            provider: "openai".into(),
            hint: "Set OPENAI_API_KEY.".into(),
        };
        assert!(e.to_string().contains("openai"));
        assert!(e.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn journal_write_failed_display() {
        let e = CommonplaceError::JournalWriteFailed {
            path: PathBuf::from("logs/2024-01-01.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("2024-01-01.md"));
    }

    #[test]
    fn outcome_is_logged() {
        assert!(!RunOutcome::NoBooks.is_logged());
        assert!(RunOutcome::Logged {
            book: "b".into(),
            quote: "q".into(),
            reflection: "r".into(),
            log_path: PathBuf::from("logs/x.md"),
        }
        .is_logged());
    }
}
