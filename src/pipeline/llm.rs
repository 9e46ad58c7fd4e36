//! Model interaction: send a fragment, parse the reply.
//!
//! This module is intentionally thin. The prompt contract lives in
//! [`crate::prompts`]; the attempt budget and retry policy live in the
//! orchestrator. Here we only build the chat request and turn the raw
//! reply text into a [`QuoteOutcome`], so the orchestrator's loop can
//! match exhaustively instead of comparing sentinel strings.

use std::sync::Arc;

use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::config::SamplerConfig;
use crate::error::CommonplaceError;
use crate::prompts::{extraction_request, EXTRACTION_SYSTEM_PROMPT, SKIP_SENTINEL};

/// Maximum tokens the model may spend on one reply.
///
/// A quote plus a two-sentence reflection fits comfortably; anything longer
/// is the model rambling.
const MAX_REPLY_TOKENS: usize = 512;

/// A parsed quote-and-reflection payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    /// Short verbatim quote, at most two sentences.
    pub quote: String,
    /// The model's one-to-two-sentence reflection.
    #[serde(default)]
    pub reflection: String,
}

/// The three possible shapes of one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// The model judged the fragment unusable.
    Skip,
    /// A well-formed quote payload.
    Parsed(Quote),
    /// Neither the sentinel nor parseable JSON with a quote.
    Malformed,
}

/// Anything that can turn a fragment into a [`QuoteOutcome`].
///
/// The orchestrator holds this as a trait object so tests can script
/// replies without a live model.
#[async_trait]
pub trait QuoteExtractor: Send + Sync {
    /// One model attempt for the given book fragment.
    ///
    /// Transport failures are hard errors; skip and malformed replies are
    /// ordinary outcomes.
    async fn extract_quote(
        &self,
        book_name: &str,
        fragment: &str,
    ) -> Result<QuoteOutcome, CommonplaceError>;
}

/// [`QuoteExtractor`] backed by an edgequake-llm chat provider.
pub struct LlmQuoteExtractor {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
}

impl LlmQuoteExtractor {
    /// Wrap a provider with the run's completion options.
    pub fn new(provider: Arc<dyn LLMProvider>, config: &SamplerConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
        }
    }
}

#[async_trait]
impl QuoteExtractor for LlmQuoteExtractor {
    async fn extract_quote(
        &self,
        book_name: &str,
        fragment: &str,
    ) -> Result<QuoteOutcome, CommonplaceError> {
        let messages = vec![
            ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
            ChatMessage::user(extraction_request(book_name, fragment)),
        ];

        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| CommonplaceError::ModelRequest {
                message: e.to_string(),
            })?;

        debug!(
            "Model reply: {} in / {} out tokens",
            response.prompt_tokens, response.completion_tokens
        );

        Ok(parse_reply(&response.content))
    }
}

/// Build `CompletionOptions` from the sampler config.
fn build_options(config: &SamplerConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(MAX_REPLY_TOKENS),
        ..Default::default()
    }
}

// ── Reply parsing ─────────────────────────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```(?:json)?\n(.*)\n```\s*$").unwrap());

/// Strip an outer code fence (models sometimes disobey the prompt).
fn strip_reply_fences(input: &str) -> &str {
    match RE_OUTER_FENCES.captures(input) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(input),
        None => input,
    }
}

/// Parse a raw model reply into a [`QuoteOutcome`].
///
/// The reply is either the skip sentinel, a JSON object with a non-empty
/// `quote` key, or malformed. Malformed replies are not errors; they just
/// consume one of the orchestrator's attempts.
pub fn parse_reply(raw: &str) -> QuoteOutcome {
    let body = strip_reply_fences(raw.trim()).trim();

    if body == SKIP_SENTINEL {
        return QuoteOutcome::Skip;
    }

    match serde_json::from_str::<Quote>(body) {
        Ok(q) if !q.quote.trim().is_empty() => QuoteOutcome::Parsed(q),
        _ => QuoteOutcome::Malformed,
    }
}
