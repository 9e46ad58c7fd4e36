//! The junk classifier: cheap heuristics that decide whether a sampled
//! fragment is worth a model call.
//!
//! Extracted PDF text is full of front matter, indices, and tabular debris.
//! Four deterministic rules catch most of it without any I/O or model
//! involvement. Rules run cheapest-first and short-circuit on the first
//! positive match:
//!
//! 1. Too short to quote (< 220 chars)
//! 2. Front-matter marker phrase (case-insensitive substring)
//! 3. Digit density > 8% (index / table-of-contents shape)
//! 4. Many short lines (tabular or list layout)
//!
//! All thresholds count characters, not bytes.

/// Minimum fragment length worth considering, in characters.
const MIN_FRAGMENT_CHARS: usize = 220;

/// Maximum fraction of decimal digits before a fragment reads as an index.
const MAX_DIGIT_DENSITY: f64 = 0.08;

/// Line-shape rule: at least this many non-empty lines...
const MIN_LINES_FOR_SHAPE_RULE: usize = 8;

/// ...where more than this fraction are shorter than [`SHORT_LINE_CHARS`].
const MAX_SHORT_LINE_RATIO: f64 = 0.60;

/// A line under this many trimmed characters counts as "short".
const SHORT_LINE_CHARS: usize = 30;

/// Substrings that flag front matter and structural pages.
///
/// Matched against a lowercased copy of the fragment. Deliberately broad:
/// a false positive only costs one of the selector's sampling attempts.
const MARKER_PHRASES: &[&str] = &[
    "isbn",
    "copyright",
    "all rights reserved",
    "index",
    "table",
    "chapter",
    "contents",
];

/// Classify a fragment as junk (`true`) or usable (`false`).
///
/// Deterministic and side-effect-free; safe to call in a tight retry loop.
pub fn is_junk(fragment: &str) -> bool {
    let char_count = fragment.chars().count();

    // Rule 1: too short to be meaningfully quotable.
    if char_count < MIN_FRAGMENT_CHARS {
        return true;
    }

    // Rule 2: front-matter / structural marker phrases.
    let lowered = fragment.to_lowercase();
    if MARKER_PHRASES.iter().any(|m| lowered.contains(m)) {
        return true;
    }

    // Rule 3: digit density flags index- and TOC-like content.
    let digits = fragment.chars().filter(|c| c.is_ascii_digit()).count();
    if digits as f64 / char_count as f64 > MAX_DIGIT_DENSITY {
        return true;
    }

    // Rule 4: many short lines flag tabular/list layouts.
    let lines: Vec<&str> = fragment
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() >= MIN_LINES_FOR_SHAPE_RULE {
        let short = lines
            .iter()
            .filter(|l| l.chars().count() < SHORT_LINE_CHARS)
            .count();
        if short as f64 / lines.len() as f64 > MAX_SHORT_LINE_RATIO {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fragment of ordinary prose long enough to clear the length rule.
    fn prose() -> String {
        "The river carried the morning light downstream, and for a while nobody \
         spoke. Each of them had come to the water with a different grief, and \
         each found, in the slow insistence of the current, a reason to put it \
         down for an hour and simply watch."
            .to_string()
    }

    #[test]
    fn short_fragments_are_junk() {
        assert!(is_junk("Too short to quote."));
        let just_under: String = "a".repeat(MIN_FRAGMENT_CHARS - 1);
        assert!(is_junk(&just_under));
    }

    #[test]
    fn length_threshold_counts_chars_not_bytes() {
        // 219 multi-byte chars is still short, 220 is not.
        let wide: String = "á".repeat(MIN_FRAGMENT_CHARS);
        assert!(!is_junk(&wide));
    }

    #[test]
    fn isbn_is_junk_in_any_case() {
        let f = format!("{} ISBN 978-0-00-000000-0", prose());
        assert!(is_junk(&f));
        let f = format!("{} isbn data", prose());
        assert!(is_junk(&f));
        let f = format!("{} IsBn", prose());
        assert!(is_junk(&f));
    }

    #[test]
    fn copyright_page_is_junk() {
        let f = format!("{} Copyright and all rights reserved.", prose());
        assert!(is_junk(&f));
    }

    #[test]
    fn digit_dense_fragment_is_junk() {
        // An index-like block: plenty of length, way over 8% digits.
        let f = "Introduction 3 17 29 44 58 63 71 89 94 101 117 129 144 158 \
                 163 171 189 194 201 217 229 244 258 263 271 289 294 301 317 \
                 329 344 358 363 371 389 394 401 417 429 444 458 463 471 489"
            .repeat(2);
        assert!(f.chars().count() >= MIN_FRAGMENT_CHARS);
        assert!(is_junk(&f));
    }

    #[test]
    fn prose_with_a_stray_number_passes() {
        let f = format!("{} It was the summer he turned seven.", prose());
        assert!(!is_junk(&f));
    }

    #[test]
    fn many_short_lines_are_junk() {
        // 10 lines, each under 30 chars, no marker words, long enough overall.
        let f = vec!["a whisper of morning wind"; 10].join("\n");
        assert!(f.chars().count() >= MIN_FRAGMENT_CHARS);
        assert!(is_junk(&f));
    }

    #[test]
    fn long_lines_pass_the_shape_rule() {
        // The same 10-line shape but every line 40+ chars reads as prose.
        let f = vec!["the slow insistence of the current held them all morning"; 10].join("\n");
        assert!(!is_junk(&f));
    }

    #[test]
    fn fewer_than_eight_lines_never_trips_the_shape_rule() {
        let mut f = vec!["short line here"; 7].join("\n");
        // Pad past the length rule without adding lines.
        f.push_str(" and then the paragraph carried on at length, unhurried, ");
        f.push_str(&prose());
        assert!(!is_junk(&f));
    }

    #[test]
    fn clean_prose_is_usable() {
        assert!(!is_junk(&prose()));
    }
}
