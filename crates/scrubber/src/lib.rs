pub mod classify;
pub mod clean;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod report;
pub mod util;

pub use classify::{select_auto_clean, AutoCleanSelector, Classifier, RuleOverrides};
pub use clean::{
    select_backend, DeleteOptions, DeleteOutcome, DeleteReport, Deleter, Prompter, RemovalBackend,
    ScriptedPrompter, TerminalPrompter,
};
pub use config::{Config, Settings};
pub use error::{Result, ScrubError};
pub use index::{
    find_duplicates, hash_file, scan, scan_directory, DuplicateDetector, HashAlgorithm, ScanOptions,
    ScanOutcome, ScanStats,
};
pub use model::{Category, DuplicateGroup, FileRecord};
pub use report::{load_json_report, summarize, top_files, write_json_report, JsonReport, ScanSummary};
