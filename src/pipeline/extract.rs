//! Best-effort PDF text extraction.
//!
//! pdf-extract is treated as an opaque capability: bytes in, one big string
//! out. No structural parsing happens here; reading-order glitches and
//! layout noise are the normaliser's and classifier's problem. Extraction
//! is CPU-bound and not async-safe, so it runs under `spawn_blocking`.

use std::path::Path;

use tracing::debug;

use crate::error::CommonplaceError;

/// A book's raw extracted text plus its display name.
///
/// Created once per run and discarded at the end of it.
#[derive(Debug, Clone)]
pub struct Document {
    /// File stem, used in log entries and notifications.
    pub name: String,
    /// Raw extracted text, before normalisation.
    pub text: String,
}

/// Extract the full text of a PDF book.
///
/// Fails with [`CommonplaceError::ExtractionFailed`] on corrupt input or
/// when the PDF contains no extractable text (scanned images, for example).
pub async fn extract_document(path: &Path) -> Result<Document, CommonplaceError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CommonplaceError::BookUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

    let owned = path.to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| CommonplaceError::ExtractionFailed {
            path: path.to_path_buf(),
            detail: format!("extraction task failed: {e}"),
        })?
        .map_err(|e| CommonplaceError::ExtractionFailed {
            path: owned,
            detail: e.to_string(),
        })?;

    if text.trim().is_empty() {
        return Err(CommonplaceError::ExtractionFailed {
            path: path.to_path_buf(),
            detail: "no extractable text".into(),
        });
    }

    debug!("Extracted {} chars from {}", text.len(), path.display());

    Ok(Document {
        name: display_name(path),
        text,
    })
}

/// Display name for a book: the file stem, lossy-decoded.
fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}
