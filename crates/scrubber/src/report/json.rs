//! JSON scan report.
//!
//! Version 1 wraps the entries in an object carrying `schema_version`,
//! `generated_at` and `root`. Older reports are a bare array of entries and
//! load as version 0.

use crate::error::{Result, ScrubError};
use crate::model::FileRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub path: String,
    pub size: u64,
    /// Seconds since the Unix epoch.
    pub mtime: f64,
    pub atime: f64,
    pub ctime: f64,
    pub ext: String,
    /// Content hash, empty when not computed.
    #[serde(default)]
    pub hash: String,
}

impl ReportEntry {
    pub fn from_record(record: &FileRecord, hash: Option<&str>) -> Self {
        Self {
            path: record.path.to_string_lossy().into_owned(),
            size: record.size,
            mtime: epoch_seconds(&record.modified),
            atime: epoch_seconds(&record.accessed),
            ctime: epoch_seconds(&record.changed),
            ext: record.extension.clone(),
            hash: hash.unwrap_or_default().to_string(),
        }
    }

    pub fn to_record(&self) -> FileRecord {
        FileRecord {
            path: PathBuf::from(&self.path),
            size: self.size,
            modified: from_epoch_seconds(self.mtime),
            accessed: from_epoch_seconds(self.atime),
            changed: from_epoch_seconds(self.ctime),
            extension: self.ext.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub schema_version: u32,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub root: Option<String>,
    pub files: Vec<ReportEntry>,
}

impl JsonReport {
    pub fn new(root: &Path, records: &[FileRecord], hashes: &HashMap<PathBuf, String>) -> Self {
        let files = records
            .iter()
            .map(|r| ReportEntry::from_record(r, hashes.get(&r.path).map(String::as_str)))
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            generated_at: Some(Utc::now()),
            root: Some(root.to_string_lossy().into_owned()),
            files,
        }
    }

    /// The entries as records, with the hash side-table they carry.
    pub fn to_records(&self) -> (Vec<FileRecord>, HashMap<PathBuf, String>) {
        let records = self.files.iter().map(ReportEntry::to_record).collect();
        let hashes = self
            .files
            .iter()
            .filter(|e| !e.hash.is_empty())
            .map(|e| (PathBuf::from(&e.path), e.hash.clone()))
            .collect();
        (records, hashes)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportDocument {
    Versioned(JsonReport),
    Legacy(Vec<ReportEntry>),
}

/// Writes records to `path`. Hashes are taken from `hashes` where present.
pub fn write_json_report(
    path: &Path,
    root: &Path,
    records: &[FileRecord],
    hashes: &HashMap<PathBuf, String>,
) -> Result<JsonReport> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let report = JsonReport::new(root, records, hashes);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    log::info!("Wrote report with {} entries to {}", report.files.len(), path.display());
    Ok(report)
}

pub fn load_json_report(path: &Path) -> Result<JsonReport> {
    let reader = BufReader::new(File::open(path)?);
    let document: ReportDocument = serde_json::from_reader(reader)?;

    let report = match document {
        ReportDocument::Versioned(report) => report,
        ReportDocument::Legacy(files) => JsonReport {
            schema_version: 0,
            generated_at: None,
            root: None,
            files,
        },
    };

    if report.schema_version > SCHEMA_VERSION {
        return Err(ScrubError::Config(format!(
            "Unsupported report schema version {} in {}",
            report.schema_version,
            path.display()
        )));
    }

    Ok(report)
}

fn epoch_seconds(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9
}

fn from_epoch_seconds(secs: f64) -> DateTime<Utc> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record(dir: &Path, name: &str, size: u64) -> FileRecord {
        let ts = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();
        FileRecord {
            path: dir.join(name),
            size,
            modified: ts,
            accessed: ts,
            changed: ts,
            extension: crate::model::record::extension_of(Path::new(name)),
        }
    }

    #[test]
    fn test_write_and_load_report() {
        let temp_dir = TempDir::new().unwrap();
        let records = vec![
            sample_record(temp_dir.path(), "a.txt", 10),
            sample_record(temp_dir.path(), "b.bin", 20),
        ];
        let mut hashes = HashMap::new();
        hashes.insert(records[0].path.clone(), "abc123".to_string());

        let out = temp_dir.path().join("reports/scan.json");
        write_json_report(&out, temp_dir.path(), &records, &hashes).unwrap();

        let loaded = load_json_report(&out).unwrap();
        assert_eq!(loaded.schema_version, SCHEMA_VERSION);
        assert!(loaded.generated_at.is_some());
        assert_eq!(loaded.files.len(), 2);
        assert_eq!(loaded.files[0].hash, "abc123");
        assert_eq!(loaded.files[1].hash, "");
        assert_eq!(loaded.files[0].ext, ".txt");
        assert_eq!(loaded.files[0].mtime, 1_700_000_000.5);

        let (restored, restored_hashes) = loaded.to_records();
        assert_eq!(restored, records);
        assert_eq!(restored_hashes, hashes);
    }

    #[test]
    fn test_written_fields() {
        let temp_dir = TempDir::new().unwrap();
        let records = vec![sample_record(temp_dir.path(), "a.txt", 10)];
        let out = temp_dir.path().join("scan.json");
        write_json_report(&out, temp_dir.path(), &records, &HashMap::new()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["schema_version"], 1);
        let entry = &value["files"][0];
        for key in ["path", "size", "mtime", "atime", "ctime", "ext", "hash"] {
            assert!(entry.get(key).is_some(), "missing {}", key);
        }
        assert!(entry["mtime"].is_f64());
        assert!(entry["size"].is_u64());
    }

    #[test]
    fn test_load_legacy_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"[{"path": "/x/a.tmp", "size": 3, "mtime": 1.5, "atime": 1.5, "ctime": 1.0, "ext": ".tmp", "hash": ""}]"#,
        )
        .unwrap();

        let report = load_json_report(&path).unwrap();
        assert_eq!(report.schema_version, 0);
        assert!(report.root.is_none());
        assert_eq!(report.files[0].to_record().size, 3);
    }

    #[test]
    fn test_load_rejects_future_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("future.json");
        fs::write(&path, r#"{"schema_version": 99, "files": []}"#).unwrap();

        assert!(matches!(load_json_report(&path), Err(ScrubError::Config(_))));
    }
}
