use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Size cut-off in megabytes (1 MB = 1024 * 1024 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeThreshold {
    megabytes: f64,
}

impl SizeThreshold {
    pub const DEFAULT_MB: f64 = 2.0;

    pub fn from_megabytes(megabytes: f64) -> Self {
        Self { megabytes }
    }

    pub fn megabytes(&self) -> f64 {
        self.megabytes
    }

    pub fn is_below(&self, size_bytes: u64) -> bool {
        size_in_mb(size_bytes) < self.megabytes
    }
}

impl Default for SizeThreshold {
    fn default() -> Self {
        Self::from_megabytes(Self::DEFAULT_MB)
    }
}

impl fmt::Display for SizeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} MB", self.megabytes)
    }
}

pub fn size_in_mb(size_bytes: u64) -> f64 {
    size_bytes as f64 / BYTES_PER_MB
}

/// Which side of the threshold gets relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Files strictly below the threshold
    #[default]
    Lightweight,
    /// Files at or above the threshold
    Large,
    /// Every regular file, regardless of size
    All,
}

impl Selection {
    pub fn wants(&self, threshold: SizeThreshold, size_bytes: u64) -> bool {
        match self {
            Selection::Lightweight => threshold.is_below(size_bytes),
            Selection::Large => !threshold.is_below(size_bytes),
            Selection::All => true,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selection::Lightweight => "lightweight",
            Selection::Large => "large",
            Selection::All => "all",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSourcePolicy {
    #[default]
    Fail,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One entry of the source directory listing.
#[derive(Debug, Clone)]
pub struct SourceEntry {
    pub file_name: OsString,
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size_bytes: u64,
}

impl SourceEntry {
    pub fn is_regular_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub name: String,
    #[serde(skip)]
    pub file_name: OsString,
    #[serde(skip)]
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl Candidate {
    pub fn size_mb(&self) -> f64 {
        size_in_mb(self.size_bytes)
    }
}

impl From<SourceEntry> for Candidate {
    fn from(entry: SourceEntry) -> Self {
        Self {
            name: entry.file_name.to_string_lossy().into_owned(),
            file_name: entry.file_name,
            path: entry.path,
            size_bytes: entry.size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    Move,
    Keep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEntry {
    pub candidate: Candidate,
    pub action: PlannedAction,
}

/// Move/keep decisions for the regular files, in listing order.
#[derive(Debug, Clone, Default)]
pub struct MovePlan {
    pub entries: Vec<PlannedEntry>,
    pub skipped_entries: usize,
}

impl MovePlan {
    pub fn push(&mut self, candidate: Candidate, action: PlannedAction) {
        self.entries.push(PlannedEntry { candidate, action });
    }

    pub fn move_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.action == PlannedAction::Move)
            .count()
    }

    pub fn keep_count(&self) -> usize {
        self.entries.len() - self.move_count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovedFile {
    pub name: String,
    pub size_bytes: u64,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveReport {
    pub selection: Selection,
    pub threshold_mb: f64,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub moved: Vec<MovedFile>,
    pub kept: Vec<Candidate>,
    pub skipped_entries: usize,
    pub source_missing: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl MoveReport {
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    pub fn kept_count(&self) -> usize {
        self.kept.len()
    }

    pub fn moved_bytes(&self) -> u64 {
        self.moved.iter().map(|m| m.size_bytes).sum()
    }
}
