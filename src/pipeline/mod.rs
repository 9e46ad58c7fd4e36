//! Pipeline stages for one sampling run.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──▶ select ◀──▶ classify ──▶ llm
//! (pdf text)  (whitespace)  (windows)   (junk veto)  (quote or skip)
//! ```
//!
//! 1. [`extract`]   — best-effort PDF text extraction; runs in
//!    `spawn_blocking` because pdf-extract is CPU-bound
//! 2. [`normalize`] — collapse whitespace/newline noise from extraction
//! 3. [`select`]    — sample random paragraph windows, retrying against
//!    the classifier
//! 4. [`classify`]  — deterministic junk veto; runs before any model call
//! 5. [`llm`]       — the only stage with network I/O; one chat call per
//!    attempt, reply parsed into a tagged outcome

pub mod classify;
pub mod extract;
pub mod llm;
pub mod normalize;
pub mod select;
