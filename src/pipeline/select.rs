//! Fragment selection: turn a whole document into one quotable window.
//!
//! The selector normalises the document, splits it into paragraphs, and
//! samples random windows of up to three consecutive paragraphs until the
//! junk classifier accepts one. First acceptable window wins; there is no
//! scoring or ranking across attempts, and previously tried start indices
//! are not deduplicated (the attempt budget is small enough that repeats
//! are acceptable).
//!
//! Documents that are too small to sample meaningfully produce `None`
//! rather than a degenerate fragment.

use rand::Rng;

use super::classify::is_junk;
use super::normalize::normalize;

/// Minimum normalised document length worth sampling, in characters.
const MIN_DOCUMENT_CHARS: usize = 800;

/// Minimum paragraph count worth sampling.
const MIN_PARAGRAPHS: usize = 5;

/// How many random windows to try before giving up on the document.
const SAMPLE_ATTEMPTS: usize = 12;

/// Consecutive paragraphs per window.
const WINDOW_PARAGRAPHS: usize = 3;

/// Maximum fragment length, in characters.
const MAX_FRAGMENT_CHARS: usize = 1600;

/// Select one usable fragment from raw document text.
///
/// Returns `None` when the document is too small (under 800 normalised
/// characters or under 5 paragraphs) or when all 12 sampled windows were
/// classified junk. The RNG is injected so callers can seed it for
/// deterministic tests.
pub fn select_fragment<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> Option<String> {
    let normalized = normalize(raw);
    if normalized.chars().count() < MIN_DOCUMENT_CHARS {
        return None;
    }

    let paragraphs: Vec<&str> = normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.len() < MIN_PARAGRAPHS {
        return None;
    }

    for _ in 0..SAMPLE_ATTEMPTS {
        let start = rng.gen_range(0..paragraphs.len());
        let fragment = truncate_chars(&window_at(&paragraphs, start), MAX_FRAGMENT_CHARS);
        if !is_junk(&fragment) {
            return Some(fragment);
        }
    }

    None
}

/// Join up to [`WINDOW_PARAGRAPHS`] paragraphs starting at `start`.
///
/// Windows near the end of the document naturally shrink to one or two
/// paragraphs; there is no wraparound.
fn window_at(paragraphs: &[&str], start: usize) -> String {
    let end = (start + WINDOW_PARAGRAPHS).min(paragraphs.len());
    paragraphs[start..end].join("\n\n")
}

/// Truncate to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
