//! Disposability classification.
//!
//! A [`Classifier`] holds an ordered list of rules, each pairing a
//! [`Matcher`] with the [`Category`] it assigns. Rules are evaluated in
//! order and the first match wins; a record no rule matches is
//! [`Category::Personal`].
//!
//! The default order is temp, cache, update. A temp suffix therefore beats
//! everything, and a cache-like directory in the path beats an installer
//! extension.

use crate::model::{Category, FileRecord};
use serde::{Deserialize, Serialize};

/// Suffixes of transient artifacts (backups, partial downloads, OS placeholders).
pub const TEMP_SUFFIXES: [&str; 8] = [
    "~",
    ".tmp",
    ".temp",
    ".crdownload",
    ".part",
    "__pycache__",
    "thumbs.db",
    "desktop.ini",
];

/// Path fragments that mark cache-like locations.
pub const CACHE_DIR_FRAGMENTS: [&str; 4] = ["cache", "tmp", "temp", "logs"];

/// Installer and update package extensions.
pub const UPDATE_EXTENSIONS: [&str; 4] = [".msi", ".msix", ".exe", ".upd"];

/// How a rule tests a record. All comparisons are on lowercase text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// The path or the file name ends with one of the suffixes.
    Suffix(Vec<String>),
    /// The path contains one of the fragments.
    PathContains(Vec<String>),
    /// The extension (with dot) is one of these.
    Extension(Vec<String>),
}

impl Matcher {
    pub fn matches(&self, path: &str, name: &str, extension: &str) -> bool {
        match self {
            Matcher::Suffix(suffixes) => suffixes
                .iter()
                .any(|s| path.ends_with(s.as_str()) || name.ends_with(s.as_str())),
            Matcher::PathContains(fragments) => fragments.iter().any(|f| path.contains(f.as_str())),
            Matcher::Extension(extensions) => extensions.iter().any(|e| e == extension),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    pub category: Category,
    pub matcher: Matcher,
}

/// Extra patterns appended to the built-in lists, usually from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    pub temp_suffixes: Vec<String>,
    pub cache_fragments: Vec<String>,
    pub update_extensions: Vec<String>,
    pub auto_clean_markers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_overrides(&RuleOverrides::default())
    }
}

impl Classifier {
    /// Builds a classifier from rules in priority order.
    pub fn new(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    /// The built-in rules, each list extended by `overrides`.
    pub fn with_overrides(overrides: &RuleOverrides) -> Self {
        let temp = merge(&TEMP_SUFFIXES, &overrides.temp_suffixes, str::to_string);
        let cache = merge(&CACHE_DIR_FRAGMENTS, &overrides.cache_fragments, str::to_string);
        let update = merge(&UPDATE_EXTENSIONS, &overrides.update_extensions, dotted);

        Self::new(vec![
            ClassificationRule {
                category: Category::Temp,
                matcher: Matcher::Suffix(temp),
            },
            ClassificationRule {
                category: Category::Cache,
                matcher: Matcher::PathContains(cache),
            },
            ClassificationRule {
                category: Category::Update,
                matcher: Matcher::Extension(update),
            },
        ])
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn classify(&self, record: &FileRecord) -> Category {
        let path = record.lowercase_path();
        let name = record.lowercase_name();
        let extension = record.extension.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(&path, &name, &extension))
            .map(|rule| rule.category)
            .unwrap_or(Category::Personal)
    }

    pub fn classify_batch<'a>(&self, records: &'a [FileRecord]) -> Vec<(&'a FileRecord, Category)> {
        records.iter().map(|r| (r, self.classify(r))).collect()
    }
}

fn merge(builtin: &[&str], extra: &[String], normalize: fn(&str) -> String) -> Vec<String> {
    let mut merged: Vec<String> = builtin.iter().map(|s| s.to_string()).collect();
    for item in extra {
        let item = normalize(&item.trim().to_lowercase());
        if !item.is_empty() && !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}

fn dotted(ext: &str) -> String {
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn create_test_record(path: &str) -> FileRecord {
        let path = PathBuf::from(path);
        let extension = crate::model::record::extension_of(&path);
        let now = Utc::now();
        FileRecord {
            path,
            size: 1024,
            modified: now,
            accessed: now,
            changed: now,
            extension,
        }
    }

    fn classify(path: &str) -> Category {
        Classifier::default().classify(&create_test_record(path))
    }

    #[test]
    fn test_temp_suffixes() {
        assert_eq!(classify("/home/u/test.tmp"), Category::Temp);
        assert_eq!(classify("/home/u/report.docx~"), Category::Temp);
        assert_eq!(classify("/home/u/Downloads/movie.mkv.crdownload"), Category::Temp);
        assert_eq!(classify("/home/u/Pictures/Thumbs.db"), Category::Temp);
        assert_eq!(classify("/home/u/video.PART"), Category::Temp);
    }

    #[test]
    fn test_cache_fragments() {
        assert_eq!(classify("/home/u/.cache/pip/wheel.whl"), Category::Cache);
        assert_eq!(classify("/var/Logs/app/current.txt"), Category::Cache);
        assert_eq!(classify("/home/u/Temp/readme.md"), Category::Cache);
    }

    #[test]
    fn test_update_extensions() {
        assert_eq!(classify("/home/u/Downloads/Setup.EXE"), Category::Update);
        assert_eq!(classify("/home/u/Downloads/tool.msi"), Category::Update);
    }

    #[test]
    fn test_personal_default() {
        assert_eq!(classify("/home/u/Documents/thesis.pdf"), Category::Personal);
        assert_eq!(classify("/home/u/Music/song.mp3"), Category::Personal);
    }

    #[test]
    fn test_cache_location_beats_installer_extension() {
        assert_eq!(classify("/home/u/.cache/installer.exe"), Category::Cache);
    }

    #[test]
    fn test_temp_suffix_beats_cache_location() {
        assert_eq!(classify("/home/u/.cache/download.tmp"), Category::Temp);
    }

    #[test]
    fn test_overrides_extend_builtin_lists() {
        let overrides = RuleOverrides {
            temp_suffixes: vec![".BAK".to_string()],
            cache_fragments: vec!["node_modules".to_string()],
            update_extensions: vec!["dmg".to_string()],
            auto_clean_markers: Vec::new(),
        };
        let classifier = Classifier::with_overrides(&overrides);

        assert_eq!(classifier.classify(&create_test_record("/x/old.bak")), Category::Temp);
        assert_eq!(
            classifier.classify(&create_test_record("/x/node_modules/a.js")),
            Category::Cache
        );
        assert_eq!(classifier.classify(&create_test_record("/x/app.dmg")), Category::Update);
        assert_eq!(classifier.classify(&create_test_record("/x/test.tmp")), Category::Temp);
        assert_eq!(classifier.rules().len(), 3);
    }

    #[test]
    fn test_custom_rule_order() {
        let classifier = Classifier::new(vec![
            ClassificationRule {
                category: Category::Update,
                matcher: Matcher::Extension(vec![".exe".to_string()]),
            },
            ClassificationRule {
                category: Category::Cache,
                matcher: Matcher::PathContains(vec!["cache".to_string()]),
            },
        ]);

        assert_eq!(
            classifier.classify(&create_test_record("/x/cache/setup.exe")),
            Category::Update
        );
    }

    #[test]
    fn test_batch_classification() {
        let records = vec![
            create_test_record("/x/a.tmp"),
            create_test_record("/x/b.pdf"),
        ];

        let results = Classifier::default().classify_batch(&records);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].1, Category::Temp);
        assert_eq!(results[1].1, Category::Personal);
    }
}
