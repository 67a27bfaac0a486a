//! # Message Locker
//!
//! Keeps the messages recovered from decoded images. The locker is a plain
//! value: callers load it, pass it around by reference and save it back.
//! It is persisted as pretty-printed JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One recovered message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockerEntry {
    pub message: String,
    /// Image the message was decoded from
    pub source: String,
    pub recorded_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct Locker {
    path: PathBuf,
    entries: Vec<LockerEntry>,
}

impl Locker {
    /// Create an empty locker that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the locker stored at `path`. A missing file gives an empty locker.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No locker at {}, starting empty", path.display());
            return Ok(Self::new(path));
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read locker {}", path.display()))?;
        let entries: Vec<LockerEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse locker {}", path.display()))?;

        Ok(Self { path, entries })
    }

    /// Add a recovered message. Empty messages are ignored.
    ///
    /// Returns whether the message was recorded.
    pub fn record(&mut self, message: &str, source: &str) -> bool {
        if message.is_empty() {
            return false;
        }

        self.entries.push(LockerEntry {
            message: message.to_string(),
            source: source.to_string(),
            recorded_at: Local::now(),
        });
        true
    }

    pub fn entries(&self) -> &[LockerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the locker back to its file.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write locker {}", self.path.display()))?;

        info!("Saved {} locker entries to {}", self.len(), self.path.display());
        Ok(())
    }
}
