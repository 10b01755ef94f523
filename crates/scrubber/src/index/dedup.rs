//! Content-hash duplicate detection.
//!
//! Hashes are memoized in a side-table keyed by path and owned by the
//! detector, so scan records stay immutable and can be shared freely.

use crate::index::hasher::{hash_file, HashAlgorithm};
use crate::model::{DuplicateGroup, FileRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Progress callback for hashing: receives (files_processed, files_total).
pub type ProgressCallback<'a> = &'a mut dyn FnMut(usize, usize);

#[derive(Debug, Default, Clone)]
pub struct DedupStats {
    pub files_hashed: usize,
    pub files_cached: usize,
    pub files_skipped_empty: usize,
    pub files_skipped_unique_size: usize,
    pub hash_failures: usize,
    pub groups_found: usize,
    pub duplicate_files: usize,
    pub wasted_bytes: u64,
}

#[derive(Debug, Default)]
pub struct DuplicateDetector {
    algorithm: HashAlgorithm,
    hashes: HashMap<PathBuf, String>,
    stats: DedupStats,
}

impl DuplicateDetector {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            hashes: HashMap::new(),
            stats: DedupStats::default(),
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Statistics from the most recent `find_duplicates` run.
    pub fn stats(&self) -> &DedupStats {
        &self.stats
    }

    /// Memoized hash for a path, if one has been computed.
    pub fn cached_hash(&self, path: &Path) -> Option<&str> {
        self.hashes.get(path).map(String::as_str)
    }

    /// The full path to hash side-table.
    pub fn hashes(&self) -> &HashMap<PathBuf, String> {
        &self.hashes
    }

    /// Returns the content hash of `record`, computing it on first use.
    ///
    /// A failed read yields `None` and is not memoized, so a later call
    /// retries.
    pub fn hash_of(&mut self, record: &FileRecord) -> Option<String> {
        if let Some(hash) = self.hashes.get(&record.path) {
            self.stats.files_cached += 1;
            return Some(hash.clone());
        }

        match hash_file(&record.path, self.algorithm) {
            Ok(hash) => {
                self.stats.files_hashed += 1;
                self.hashes.insert(record.path.clone(), hash.clone());
                Some(hash)
            }
            Err(e) => {
                log::debug!("Skipping {} for duplicate detection: {}", record.path.display(), e);
                self.stats.hash_failures += 1;
                None
            }
        }
    }

    pub fn find_duplicates<'a>(&mut self, records: &'a [FileRecord]) -> Vec<DuplicateGroup<'a>> {
        self.find_duplicates_with_progress(records, &mut |_, _| {})
    }

    /// Groups records by content hash.
    ///
    /// Zero-size files are never grouped. Files whose size no other
    /// non-empty file shares cannot have a duplicate and are not read.
    /// Groups and their members keep encounter order.
    pub fn find_duplicates_with_progress<'a>(
        &mut self,
        records: &'a [FileRecord],
        progress: ProgressCallback<'_>,
    ) -> Vec<DuplicateGroup<'a>> {
        self.stats = DedupStats::default();

        let mut size_counts: HashMap<u64, usize> = HashMap::new();
        for record in records.iter().filter(|r| r.size > 0) {
            *size_counts.entry(record.size).or_insert(0) += 1;
        }

        let candidates: Vec<&FileRecord> = records
            .iter()
            .filter(|record| {
                if record.size == 0 {
                    self.stats.files_skipped_empty += 1;
                    return false;
                }
                if size_counts.get(&record.size).copied().unwrap_or(0) < 2 {
                    self.stats.files_skipped_unique_size += 1;
                    return false;
                }
                true
            })
            .collect();

        let total = candidates.len();
        let mut order: HashMap<String, usize> = HashMap::new();
        let mut buckets: Vec<DuplicateGroup<'a>> = Vec::new();

        for (i, record) in candidates.into_iter().enumerate() {
            let hash = self.hash_of(record);
            progress(i + 1, total);

            let Some(hash) = hash else {
                continue;
            };

            match order.get(&hash) {
                Some(&idx) => buckets[idx].files.push(record),
                None => {
                    order.insert(hash.clone(), buckets.len());
                    buckets.push(DuplicateGroup {
                        hash,
                        files: vec![record],
                    });
                }
            }
        }

        let groups: Vec<DuplicateGroup<'a>> =
            buckets.into_iter().filter(|g| g.len() > 1).collect();

        self.stats.groups_found = groups.len();
        self.stats.duplicate_files = groups.iter().map(|g| g.len()).sum();
        self.stats.wasted_bytes = groups.iter().map(|g| g.wasted_bytes()).sum();

        groups
    }
}

/// One-shot duplicate search with a throwaway detector.
pub fn find_duplicates(records: &[FileRecord], algorithm: HashAlgorithm) -> Vec<DuplicateGroup<'_>> {
    DuplicateDetector::new(algorithm).find_duplicates(records)
}
