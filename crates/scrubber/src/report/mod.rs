pub mod json;
pub mod summary;

pub use json::{load_json_report, write_json_report, JsonReport, ReportEntry, SCHEMA_VERSION};
pub use summary::{summarize, top_files, CategoryTotals, ScanSummary};
