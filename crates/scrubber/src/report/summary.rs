use crate::classify::Classifier;
use crate::model::{Category, FileRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub files: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub total_files: usize,
    pub total_bytes: u64,
    /// One entry per category in [`Category::ALL`] order, including empty ones.
    pub by_category: Vec<(Category, CategoryTotals)>,
}

impl ScanSummary {
    pub fn totals_for(&self, category: Category) -> CategoryTotals {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }

    /// Bytes held by temp, cache and update files.
    pub fn reclaimable_bytes(&self) -> u64 {
        self.by_category
            .iter()
            .filter(|(c, _)| c.is_disposable())
            .map(|(_, t)| t.bytes)
            .sum()
    }
}

pub fn summarize(records: &[FileRecord], classifier: &Classifier) -> ScanSummary {
    let mut by_category: Vec<(Category, CategoryTotals)> = Category::ALL
        .iter()
        .map(|c| (*c, CategoryTotals::default()))
        .collect();

    for record in records {
        let category = classifier.classify(record);
        if let Some((_, totals)) = by_category.iter_mut().find(|(c, _)| *c == category) {
            totals.files += 1;
            totals.bytes += record.size;
        }
    }

    ScanSummary {
        total_files: records.len(),
        total_bytes: records.iter().map(|r| r.size).sum(),
        by_category,
    }
}

/// The `n` largest records, biggest first. Ties keep scan order.
pub fn top_files(records: &[FileRecord], n: usize) -> Vec<&FileRecord> {
    let mut sorted: Vec<&FileRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.size.cmp(&a.size));
    sorted.truncate(n);
    sorted
}
