//! Auto-clean candidate selection.

use crate::classify::rules::{Classifier, RuleOverrides};
use crate::model::FileRecord;

/// Directory names of large reclaimable trees. A path containing any of
/// these (case-insensitively) is a candidate even when it classifies as
/// personal.
pub const AUTO_CLEAN_DIR_MARKERS: [&str; 5] = ["node_modules", ".cache", "cache", "temp", "tmp"];

#[derive(Debug, Clone)]
pub struct AutoCleanSelector {
    classifier: Classifier,
    markers: Vec<String>,
}

impl Default for AutoCleanSelector {
    fn default() -> Self {
        Self::with_overrides(&RuleOverrides::default())
    }
}

impl AutoCleanSelector {
    pub fn new(classifier: Classifier, markers: Vec<String>) -> Self {
        let markers = markers
            .into_iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        Self { classifier, markers }
    }

    pub fn with_overrides(overrides: &RuleOverrides) -> Self {
        let mut markers: Vec<String> = AUTO_CLEAN_DIR_MARKERS.iter().map(|m| m.to_string()).collect();
        markers.extend(overrides.auto_clean_markers.iter().cloned());
        Self::new(Classifier::with_overrides(overrides), markers)
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn has_marker(&self, record: &FileRecord) -> bool {
        let path = record.lowercase_path();
        self.markers.iter().any(|m| path.contains(m.as_str()))
    }

    /// Returns every disposable record followed by every remaining record
    /// under a marker directory. Each input record appears at most once and
    /// both parts keep scan order.
    pub fn select<'a>(&self, records: &'a [FileRecord]) -> Vec<&'a FileRecord> {
        let mut selected = vec![false; records.len()];
        let mut result = Vec::new();

        for (i, record) in records.iter().enumerate() {
            if self.classifier.classify(record).is_disposable() {
                selected[i] = true;
                result.push(record);
            }
        }

        for (i, record) in records.iter().enumerate() {
            if !selected[i] && self.has_marker(record) {
                selected[i] = true;
                result.push(record);
            }
        }

        log::debug!(
            "Selected {} of {} records for auto-clean",
            result.len(),
            records.len()
        );
        result
    }
}

/// Selects auto-clean candidates with the built-in rules and markers.
pub fn select_auto_clean(records: &[FileRecord]) -> Vec<&FileRecord> {
    AutoCleanSelector::default().select(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn create_test_record(path: &str) -> FileRecord {
        let path = PathBuf::from(path);
        let extension = crate::model::record::extension_of(&path);
        let now = Utc::now();
        FileRecord {
            path,
            size: 10,
            modified: now,
            accessed: now,
            changed: now,
            extension,
        }
    }

    #[test]
    fn test_node_modules_selected_despite_personal_category() {
        let records = vec![create_test_record("/proj/node_modules/left-pad/index.js")];
        let selector = AutoCleanSelector::default();

        assert!(!selector.classifier().classify(&records[0]).is_disposable());
        assert_eq!(selector.select(&records).len(), 1);
    }

    #[test]
    fn test_base_set_precedes_marker_set() {
        let records = vec![
            create_test_record("/proj/node_modules/a.js"),
            create_test_record("/home/u/doc.pdf"),
            create_test_record("/home/u/old.tmp"),
        ];

        let selected = select_auto_clean(&records);
        assert_eq!(selected.len(), 2);
        assert!(selected[0].path.ends_with("old.tmp"));
        assert!(selected[1].path.ends_with("a.js"));
    }

    #[test]
    fn test_record_in_both_sets_appears_once() {
        let records = vec![create_test_record("/home/u/.cache/blob.tmp")];
        assert_eq!(select_auto_clean(&records).len(), 1);
    }

    #[test]
    fn test_personal_files_not_selected() {
        let records = vec![
            create_test_record("/home/u/Documents/cv.docx"),
            create_test_record("/home/u/Pictures/cat.jpg"),
        ];
        assert!(select_auto_clean(&records).is_empty());
    }

    #[test]
    fn test_custom_marker() {
        let overrides = RuleOverrides {
            auto_clean_markers: vec!["Target".to_string()],
            ..RuleOverrides::default()
        };
        let records = vec![create_test_record("/proj/target/debug/app")];

        assert!(select_auto_clean(&records).is_empty());
        assert_eq!(AutoCleanSelector::with_overrides(&overrides).select(&records).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_selection_has_no_duplicates(names in proptest::collection::vec("[a-z]{1,6}(\\.tmp|\\.exe|\\.txt)?", 0..20),
                                            dirs in proptest::collection::vec(prop_oneof![Just("cache"), Just("node_modules"), Just("docs")], 0..20)) {
            let records: Vec<FileRecord> = names
                .iter()
                .zip(dirs.iter().cycle())
                .map(|(n, d)| create_test_record(&format!("/root/{}/{}", d, n)))
                .collect();

            let selected = select_auto_clean(&records);
            prop_assert!(selected.len() <= records.len());
            for (i, a) in selected.iter().enumerate() {
                for b in &selected[i + 1..] {
                    prop_assert!(!std::ptr::eq(*a, *b));
                }
            }
        }

        #[test]
        fn prop_classification_is_deterministic(path in "/[a-zA-Z_.~]{1,12}/[a-zA-Z_.~]{1,12}") {
            let record = create_test_record(&path);
            let classifier = Classifier::default();
            prop_assert_eq!(classifier.classify(&record), classifier.classify(&record));
        }
    }
}
