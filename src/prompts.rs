//! Prompts for model-based quote extraction.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tightening the skip rule or the JSON
//!    shape requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without a
//!    live model, so prompt regressions are easy to catch.

/// The exact literal the model must return for an unusable fragment.
///
/// The orchestrator never compares raw strings itself; replies are parsed
/// into [`crate::pipeline::llm::QuoteOutcome`] and matched exhaustively.
pub const SKIP_SENTINEL: &str = "SKIP";

/// System prompt for the quote-extraction call.
///
/// The reply contract has exactly two shapes: the skip sentinel, or a JSON
/// object with the keys `quote` and `reflection`. Anything else is treated
/// as a malformed attempt by the parser.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a well-read literary companion. You will receive a passage taken from a book.

If the passage is front matter, an index, a table of contents, bibliographic data, or otherwise not worth quoting, reply with exactly:
SKIP

Otherwise reply with a single JSON object with exactly these two keys:
  "quote": one short quote taken verbatim from the passage, at most two sentences
  "reflection": your own reflection on the quote, one to two sentences

Reply with ONLY the token SKIP or ONLY the JSON object. No commentary, no code fences."#;

/// Build the user message carrying the book name and the sampled fragment.
pub fn extraction_request(book_name: &str, fragment: &str) -> String {
    format!("Book: {book_name}\n\nPassage:\n\"\"\"\n{fragment}\n\"\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_book_and_fragment() {
        let msg = extraction_request("Walden", "I went to the woods.");
        assert!(msg.contains("Walden"));
        assert!(msg.contains("I went to the woods."));
    }

    #[test]
    fn system_prompt_names_the_sentinel() {
        assert!(EXTRACTION_SYSTEM_PROMPT.contains(SKIP_SENTINEL));
    }
}
