//! Directory exclusion rules applied while walking a scan root.
//!
//! A pattern containing a glob metacharacter (`*`, `?`, `[`) is compiled into
//! a glob; anything else is a plain substring. Both kinds are tested against
//! the directory path relative to the scan root and against its absolute
//! path. Trash and recycle-bin folders are always excluded.

use crate::error::{Result, ScrubError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

const GLOB_METACHARS: [char; 3] = ['*', '?', '['];

/// Base names (lowercase) of OS recycle folders that are never descended into.
pub const RECYCLE_DIR_NAMES: [&str; 2] = ["$recycle.bin", "recycler"];

#[derive(Debug, Clone)]
pub struct ExcludeRules {
    substrings: Vec<String>,
    globs: GlobSet,
    glob_count: usize,
}

impl ExcludeRules {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut substrings = Vec::new();
        let mut builder = GlobSetBuilder::new();
        let mut glob_count = 0;

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            if is_glob(pattern) {
                // `*` may span separators, matching fnmatch-style behaviour.
                let glob = GlobBuilder::new(pattern)
                    .literal_separator(false)
                    .build()
                    .map_err(|e| ScrubError::InvalidPattern {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })?;
                builder.add(glob);
                glob_count += 1;
            } else {
                substrings.push(pattern.to_string());
            }
        }

        let globs = builder.build().map_err(|e| ScrubError::InvalidPattern {
            pattern: patterns
                .iter()
                .map(|p| p.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            substrings,
            globs,
            glob_count,
        })
    }

    pub fn empty() -> Self {
        Self {
            substrings: Vec::new(),
            globs: GlobSet::empty(),
            glob_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.substrings.len() + self.glob_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the directory at `abs` (relative form `rel`) must be pruned.
    pub fn excludes_dir(&self, rel: &Path, abs: &Path) -> bool {
        if is_recycle_dir(abs) {
            return true;
        }
        self.matches(rel, abs)
    }

    /// Pattern match only, without the built-in recycle-bin rule.
    pub fn matches(&self, rel: &Path, abs: &Path) -> bool {
        if self.glob_count > 0 && (self.globs.is_match(rel) || self.globs.is_match(abs)) {
            return true;
        }

        if self.substrings.is_empty() {
            return false;
        }

        let rel = rel.to_string_lossy();
        let abs = abs.to_string_lossy();
        self.substrings
            .iter()
            .any(|s| rel.contains(s.as_str()) || abs.contains(s.as_str()))
    }
}

pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(&GLOB_METACHARS[..])
}

pub fn is_recycle_dir(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .map(|n| RECYCLE_DIR_NAMES.contains(&n.as_str()))
        .unwrap_or(false)
}
