use crate::error::{Result, ScrubError};
use crate::index::excludes::ExcludeRules;
use crate::model::FileRecord;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Number of files seen in a single directory between progress notices.
pub const PROGRESS_INTERVAL: u64 = 2000;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_matched: usize,
    pub dirs_scanned: usize,
    pub dirs_excluded: usize,
    pub bytes_matched: u64,
    pub skipped_too_small: usize,
    pub skipped_too_new: usize,
    pub errors: usize,
}

/// Options for filesystem scanning
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Files smaller than this many bytes are left out.
    pub min_size: u64,
    /// Files modified more recently than this many days ago are left out.
    pub min_age_days: u64,
    /// Substring or glob patterns pruning whole directory subtrees.
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub root: PathBuf,
    pub records: Vec<FileRecord>,
    pub stats: ScanStats,
}

/// Scans `root` and returns only the matching records.
pub fn scan<P: AsRef<Path>>(root: P, options: &ScanOptions) -> Result<Vec<FileRecord>> {
    scan_directory(root, options).map(|outcome| outcome.records)
}

/// Walks a directory tree and collects a record for each regular file.
///
/// Directories matched by the exclude rules are pruned before descending.
/// The root is tested like any other directory, with an empty relative
/// path; if it matches, nothing is scanned. Files modified in the future
/// never pass the age filter.
/// Files that cannot be stat'ed are skipped and counted in `errors`; they
/// never abort the scan. Only an unusable root or a malformed exclude
/// pattern is reported as an error.
pub fn scan_directory<P: AsRef<Path>>(root: P, options: &ScanOptions) -> Result<ScanOutcome> {
    let root = std::path::absolute(root.as_ref())?;

    if !root.exists() {
        return Err(ScrubError::RootNotFound(root));
    }
    if !root.is_dir() {
        return Err(ScrubError::NotADirectory(root));
    }

    let excludes = ExcludeRules::new(&options.exclude_patterns)?;
    let now = Utc::now();
    let mut stats = ScanStats::default();
    let mut records = Vec::new();
    let mut progress = DirProgress::default();
    let mut dirs_excluded = 0usize;

    log::info!("Scanning {}", root.display());

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
            if excludes.excludes_dir(rel, entry.path()) {
                log::debug!("Excluding {}", entry.path().display());
                dirs_excluded += 1;
                return false;
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Walk error: {}", e);
                stats.errors += 1;
                continue;
            }
        };

        if entry.file_type().is_dir() {
            stats.dirs_scanned += 1;
            progress.enter_dir(entry.depth());
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        stats.files_scanned += 1;
        if let Some(count) = progress.note_file(entry.depth()) {
            if let Some(parent) = entry.path().parent() {
                log::info!("Scanning {} ({} files)...", parent.display(), count);
            }
        }

        if let Some(record) = process_entry(&entry, options, now, &mut stats) {
            stats.files_matched += 1;
            stats.bytes_matched += record.size;
            records.push(record);
        }
    }

    stats.dirs_excluded = dirs_excluded;
    if stats.dirs_scanned == 0 && dirs_excluded > 0 {
        log::warn!("Scan root {} matches an exclude pattern; nothing scanned", root.display());
    }

    log::info!(
        "Scan of {} complete: {} files matched out of {} ({} errors)",
        root.display(),
        stats.files_matched,
        stats.files_scanned,
        stats.errors
    );

    Ok(ScanOutcome {
        root,
        records,
        stats,
    })
}

fn process_entry(
    entry: &DirEntry,
    options: &ScanOptions,
    now: DateTime<Utc>,
    stats: &mut ScanStats,
) -> Option<FileRecord> {
    let path = entry.path();

    let metadata = match entry.metadata() {
        Ok(m) => m,
        Err(e) => {
            log::debug!("Failed to get metadata for {}: {}", path.display(), e);
            stats.errors += 1;
            return None;
        }
    };

    let record = FileRecord::from_metadata(path.to_path_buf(), &metadata);

    if record.size < options.min_size {
        stats.skipped_too_small += 1;
        return None;
    }

    // A future mtime gives a negative age and is skipped even at zero days.
    if (now - record.modified).num_seconds() < min_age_seconds(options.min_age_days) {
        stats.skipped_too_new += 1;
        return None;
    }

    Some(record)
}

fn min_age_seconds(days: u64) -> i64 {
    i64::try_from(days)
        .ok()
        .and_then(|d| d.checked_mul(SECONDS_PER_DAY))
        .unwrap_or(i64::MAX)
}

/// Per-directory file counts for the directories currently open in the walk.
///
/// Index `d` holds the count for the open directory at depth `d`. Entries
/// deeper than the one being visited belong to closed directories and are
/// dropped, so memory is bounded by the tree depth.
#[derive(Debug, Default)]
struct DirProgress {
    open_dirs: Vec<u64>,
}

impl DirProgress {
    fn enter_dir(&mut self, depth: usize) {
        self.open_dirs.truncate(depth);
        self.open_dirs.push(0);
    }

    /// Counts a file at `depth`; returns the running count when a notice is due.
    fn note_file(&mut self, depth: usize) -> Option<u64> {
        if depth == 0 {
            return None;
        }
        self.open_dirs.truncate(depth);
        let count = self.open_dirs.last_mut()?;
        *count += 1;
        (*count % PROGRESS_INTERVAL == 0).then_some(*count)
    }
}
