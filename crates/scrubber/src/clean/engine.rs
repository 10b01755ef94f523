//! Batch deletion with confirmation gates.
//!
//! Without `confirm` or `interactive`, one prompt gates the whole batch and
//! declining it leaves the filesystem untouched. With `interactive`, each
//! file gets its own prompt. Per-file failures are recorded and the batch
//! carries on; a partly completed batch is a normal result.

use crate::clean::backend::RemovalBackend;
use crate::clean::prompt::Prompter;
use crate::error::Result;
use crate::model::FileRecord;
use crate::util::format_bytes;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Skip the batch-level confirmation.
    pub confirm: bool,
    /// Ask about every file individually.
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Skipped,
    Failed(String),
}

#[derive(Debug, Default, Clone)]
pub struct DeleteReport {
    pub outcomes: Vec<(PathBuf, DeleteOutcome)>,
    /// The batch prompt was declined; nothing was touched.
    pub aborted: bool,
    pub removed_bytes: u64,
}

impl DeleteReport {
    fn count(&self, pred: impl Fn(&DeleteOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    pub fn removed_count(&self) -> usize {
        self.count(|o| *o == DeleteOutcome::Removed)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| *o == DeleteOutcome::Skipped)
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, DeleteOutcome::Failed(_)))
    }

    pub fn outcome_for(&self, path: &std::path::Path) -> Option<&DeleteOutcome> {
        self.outcomes.iter().find(|(p, _)| p == path).map(|(_, o)| o)
    }
}

pub struct Deleter {
    backend: Box<dyn RemovalBackend>,
}

impl Deleter {
    pub fn new(backend: Box<dyn RemovalBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn RemovalBackend {
        self.backend.as_ref()
    }

    fn verb(&self) -> &'static str {
        if self.backend.is_permanent() {
            "Permanently delete"
        } else {
            "Move to trash"
        }
    }

    /// Removes `records` through the backend.
    ///
    /// Errors only when the backend is unusable or the batch prompt itself
    /// fails; both happen before any file is touched.
    pub fn delete(
        &self,
        records: &[&FileRecord],
        options: DeleteOptions,
        prompter: &mut dyn Prompter,
    ) -> Result<DeleteReport> {
        let mut report = DeleteReport::default();
        if records.is_empty() {
            return Ok(report);
        }

        self.backend.check_available()?;

        if !options.confirm && !options.interactive {
            let total: u64 = records.iter().map(|r| r.size).sum();
            let question = format!(
                "{} {} files ({})?",
                self.verb(),
                records.len(),
                format_bytes(total)
            );
            if !prompter.confirm(&question)? {
                log::info!("Deletion of {} files declined", records.len());
                report.aborted = true;
                return Ok(report);
            }
        }

        for record in records {
            let outcome = self.delete_one(record, options.interactive, prompter);
            if outcome == DeleteOutcome::Removed {
                report.removed_bytes += record.size;
            }
            report.outcomes.push((record.path.clone(), outcome));
        }

        log::info!(
            "Deletion finished via {}: {} removed, {} skipped, {} failed",
            self.backend.name(),
            report.removed_count(),
            report.skipped_count(),
            report.failed_count()
        );

        Ok(report)
    }

    fn delete_one(&self, record: &FileRecord, interactive: bool, prompter: &mut dyn Prompter) -> DeleteOutcome {
        if interactive {
            let question = format!(
                "{} {} ({})?",
                self.verb(),
                record.path.display(),
                format_bytes(record.size)
            );
            match prompter.confirm(&question) {
                Ok(true) => {}
                Ok(false) => return DeleteOutcome::Skipped,
                Err(e) => return DeleteOutcome::Failed(e.to_string()),
            }
        }

        match self.backend.remove(&record.path) {
            Ok(()) => {
                log::debug!("Removed {}", record.path.display());
                DeleteOutcome::Removed
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", record.path.display(), e);
                DeleteOutcome::Failed(e.to_string())
            }
        }
    }
}
