use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Snapshot of one regular file taken at scan time.
///
/// Records are immutable once built. Content hashes live in the duplicate
/// detector's side-table rather than on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
    /// Inode change time on Unix, creation time elsewhere.
    pub changed: DateTime<Utc>,
    /// Lowercase suffix including the leading dot, or empty.
    pub extension: String,
}

impl FileRecord {
    /// Builds a record from a path and its stat result.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::UNIX_EPOCH);
        let accessed = metadata
            .accessed()
            .map(DateTime::<Utc>::from)
            .unwrap_or(modified);
        let changed = change_time(metadata).unwrap_or(modified);
        let extension = extension_of(&path);

        Self {
            path,
            size: metadata.len(),
            modified,
            accessed,
            changed,
            extension,
        }
    }

    /// Lowercased path string used by the path heuristics.
    pub fn lowercase_path(&self) -> String {
        self.path.to_string_lossy().to_lowercase()
    }

    /// Lowercased base name.
    pub fn lowercase_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Whole days elapsed since the last modification, relative to `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.modified).num_days()
    }
}

/// Lowercase extension with its leading dot. Dotfiles such as `.bashrc` have none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(unix)]
fn change_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;
    DateTime::from_timestamp(metadata.ctime(), metadata.ctime_nsec() as u32)
}

#[cfg(not(unix))]
fn change_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.created().ok().map(DateTime::<Utc>::from)
}
