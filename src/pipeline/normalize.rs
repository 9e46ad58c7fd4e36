//! Whitespace normalisation for raw extracted PDF text.
//!
//! pdf-extract output is noisy: carriage returns, ragged runs of spaces
//! where column layouts used to be, and long stretches of blank lines
//! between pages. Everything downstream (paragraph splitting, the junk
//! classifier's line-shape rule) assumes the clean form produced here.
//!
//! Rules (applied in order):
//! 1. Replace every carriage return with a single space
//! 2. Collapse runs of spaces/tabs to one space
//! 3. Collapse 3+ consecutive newlines down to exactly 2
//! 4. Trim leading/trailing whitespace
//!
//! Pure function, no error conditions.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalise raw extracted text into the form the sampler operates on.
pub fn normalize(input: &str) -> String {
    let s = input.replace('\r', " ");
    let s = RE_HORIZONTAL_WS.replace_all(&s, " ");
    let s = RE_BLANK_RUNS.replace_all(&s, "\n\n");
    s.trim().to_string()
}
