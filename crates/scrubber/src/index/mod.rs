pub mod dedup;
pub mod excludes;
pub mod hasher;
pub mod scanner;

pub use dedup::{find_duplicates, DedupStats, DuplicateDetector, ProgressCallback};
pub use excludes::ExcludeRules;
pub use hasher::{hash_file, hash_file_blake3, hash_file_md5, HashAlgorithm};
pub use scanner::{scan, scan_directory, ScanOptions, ScanOutcome, ScanStats};
