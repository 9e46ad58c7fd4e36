//! The commonplace book itself: per-day Markdown log files.
//!
//! One file per local calendar date, `<logs_dir>/YYYY-MM-DD.md`, append
//! only. The file is opened, appended, and closed per entry; no handle is
//! held across runs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::error::CommonplaceError;

/// One journalled quote, rendered to a fixed Markdown shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    /// Book display name.
    pub book_name: String,
    pub quote: String,
    pub reflection: String,
}

impl LogEntry {
    /// Build an entry stamped with the current local time.
    pub fn now(book_name: impl Into<String>, quote: impl Into<String>, reflection: impl Into<String>) -> Self {
        Self {
            time: Local::now().format("%H:%M").to_string(),
            book_name: book_name.into(),
            quote: quote.into(),
            reflection: reflection.into(),
        }
    }

    /// Render the entry as a Markdown block.
    ///
    /// The trailing blank line separates consecutive entries in the file.
    pub fn render(&self) -> String {
        format!(
            "## 🕒 {} — 📚 {}\n\n   > {}\n\n   _{}_\n\n   ---\n\n",
            self.time, self.book_name, self.quote, self.reflection
        )
    }
}

/// Append-only access to the per-day log files.
#[derive(Debug, Clone)]
pub struct Journal {
    logs_dir: PathBuf,
}

impl Journal {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }

    /// Path of the log file for today's local date.
    pub fn todays_path(&self) -> PathBuf {
        self.logs_dir
            .join(format!("{}.md", Local::now().format("%Y-%m-%d")))
    }

    /// Append one entry to today's file, creating directory and file as
    /// needed. Returns the path written, for the success notification.
    pub fn append(&self, entry: &LogEntry) -> Result<PathBuf, CommonplaceError> {
        let path = self.todays_path();

        std::fs::create_dir_all(&self.logs_dir).map_err(|e| {
            CommonplaceError::JournalWriteFailed {
                path: path.clone(),
                source: e,
            }
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| CommonplaceError::JournalWriteFailed {
                path: path.clone(),
                source: e,
            })?;

        file.write_all(entry.render().as_bytes()).map_err(|e| {
            CommonplaceError::JournalWriteFailed {
                path: path.clone(),
                source: e,
            }
        })?;

        info!("Logged quote from '{}' to {}", entry.book_name, path.display());
        Ok(path)
    }
}
