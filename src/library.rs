//! The bookshelf: scanning the books directory and picking tonight's book.
//!
//! The scan is non-recursive and matches only on the file extension,
//! case-insensitively. Results are sorted by name so the ordering (and
//! therefore a seeded random pick) is deterministic across platforms.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::CommonplaceError;

/// List the `.pdf` files directly inside `dir`, sorted by name.
///
/// An unreadable directory is a hard error; an empty one is not — the
/// orchestrator turns an empty list into a soft outcome.
pub fn scan_books(dir: &Path) -> Result<Vec<PathBuf>, CommonplaceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CommonplaceError::BooksDirUnreadable {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut books: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_pdf_extension(path))
        .collect();
    books.sort();

    debug!("Found {} book(s) in {}", books.len(), dir.display());
    Ok(books)
}

/// Pick one book uniformly at random. `None` on an empty shelf.
pub fn pick_book<'a, R: Rng + ?Sized>(books: &'a [PathBuf], rng: &mut R) -> Option<&'a PathBuf> {
    books.choose(rng)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
