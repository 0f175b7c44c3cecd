//! Step journals.
//!
//! The file journal writes one JSON object per line to
//! `{dir}/{session_id}.journal.jsonl`. Entries carry wall-clock stamps for
//! humans; replay only reads the actions.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{JournalRepository, RepositoryError, Result};
use crate::session::JournalEntry;

/// Journal kept in memory for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    session_id: String,
    entries: Vec<JournalEntry>,
}

impl InMemoryJournal {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            entries: Vec::new(),
        }
    }
}

impl JournalRepository for InMemoryJournal {
    fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.entries.clone())
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// JSON-lines journal on disk.
pub struct FileJournal {
    session_id: String,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileJournal {
    /// Opens (or creates) the journal for `session_id`, appending to any
    /// existing entries.
    pub fn open(dir: impl AsRef<Path>, session_id: impl Into<String>) -> Result<Self> {
        let session_id = session_id.into();
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(format!("{session_id}.journal.jsonl"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!(path = %path.display(), "journal opened");
        Ok(Self {
            session_id,
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a journal file without opening it for writing.
    pub fn read(path: impl AsRef<Path>) -> Result<Vec<JournalEntry>> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                RepositoryError::CorruptedJournal {
                    line: index + 1,
                    reason: e.to_string(),
                }
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

impl JournalRepository for FileJournal {
    fn append(&mut self, entry: &JournalEntry) -> Result<()> {
        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Unflushed appends are not visible until [`JournalRepository::flush`].
    fn entries(&self) -> Result<Vec<JournalEntry>> {
        Self::read(&self.path)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Drop for FileJournal {
    fn drop(&mut self) {
        if let Err(error) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), %error, "journal flush on drop failed");
        }
    }
}
