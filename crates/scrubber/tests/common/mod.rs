#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway directory tree for scanner tests.
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `content` to `rel`, creating parent directories.
    pub fn file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn sized_file(&self, rel: &str, size: usize) -> PathBuf {
        self.file(rel, &vec![b'x'; size])
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }
}

/// Sorted (path, size) pairs, for comparing scans.
pub fn path_sizes(records: &[scrubber_lib::FileRecord]) -> Vec<(PathBuf, u64)> {
    let mut pairs: Vec<(PathBuf, u64)> = records.iter().map(|r| (r.path.clone(), r.size)).collect();
    pairs.sort();
    pairs
}
