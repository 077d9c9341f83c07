//! # File-backed Record Store
//!
//! One file per table under `<data_dir>/tables/<table>.json`:
//!
//! ```text
//! {"checksum":3735928559,"count":2,"table":"app_users"}   <- header line
//! [{"id":"u1",...},{"id":"u2",...}]                      <- body line
//! ```
//!
//! The checksum covers the body bytes exactly as written. Writes go to a
//! sibling temp file which is synced and then renamed over the target.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::backend::{validate_table_name, RecordStore};
use super::errors::{StoreError, StoreResult};
use super::Record;

const TABLES_DIR: &str = "tables";

/// CRC32 (IEEE) of a table body as written
fn body_checksum(body: &str) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(body.as_bytes());
    hasher.finalize()
}

#[derive(Debug, Serialize, Deserialize)]
struct TableHeader {
    checksum: u32,
    count: usize,
    table: String,
}

/// Record store persisting each table as a checksummed JSON file
#[derive(Debug)]
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    /// Open (creating if needed) the table directory under `data_dir`.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let root = data_dir.join(TABLES_DIR);
        fs::create_dir_all(&root).map_err(|e| {
            StoreError::Unavailable(format!(
                "Failed to create table directory {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    /// Whether `data_dir` already holds a table directory
    pub fn exists(data_dir: &Path) -> bool {
        data_dir.join(TABLES_DIR).is_dir()
    }

    /// Directory holding the table files
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_path(&self, table: &str) -> StoreResult<PathBuf> {
        validate_table_name(table)?;
        Ok(self.root.join(format!("{}.json", table)))
    }

    fn decode(table: &str, contents: &str) -> StoreResult<Vec<Record>> {
        let (header_line, body) = contents
            .split_once('\n')
            .ok_or_else(|| StoreError::corrupted(table, "missing header line"))?;
        let body = body.trim_end_matches('\n');

        let header: TableHeader = serde_json::from_str(header_line)
            .map_err(|e| StoreError::corrupted(table, format!("invalid header: {}", e)))?;

        if header.table != table {
            return Err(StoreError::corrupted(
                table,
                format!("header names table '{}'", header.table),
            ));
        }
        if body_checksum(body) != header.checksum {
            return Err(StoreError::corrupted(table, "checksum mismatch"));
        }

        let records: Vec<Record> = serde_json::from_str(body)
            .map_err(|e| StoreError::corrupted(table, format!("invalid body: {}", e)))?;
        if records.len() != header.count {
            return Err(StoreError::corrupted(
                table,
                format!("expected {} records, found {}", header.count, records.len()),
            ));
        }
        Ok(records)
    }

    fn encode(table: &str, records: &[Record]) -> StoreResult<String> {
        let body = serde_json::to_string(records).map_err(|e| StoreError::Serialization {
            table: table.to_string(),
            reason: e.to_string(),
        })?;
        let header = TableHeader {
            checksum: body_checksum(&body),
            count: records.len(),
            table: table.to_string(),
        };
        let header = serde_json::to_string(&header).map_err(|e| StoreError::Serialization {
            table: table.to_string(),
            reason: e.to_string(),
        })?;
        Ok(format!("{}\n{}\n", header, body))
    }
}

impl RecordStore for FileRecordStore {
    fn read(&self, table: &str) -> StoreResult<Vec<Record>> {
        let path = self.table_path(table)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Self::decode(table, &contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::read_failed(table, e)),
        }
    }

    fn write(&self, table: &str, records: &[Record]) -> StoreResult<()> {
        let path = self.table_path(table)?;
        let contents = Self::encode(table, records)?;
        let tmp_path = path.with_extension("json.tmp");

        let written = File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(contents.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&tmp_path, &path));

        written.map_err(|e| {
            // The target is untouched; only the partial temp file needs removing
            let _ = fs::remove_file(&tmp_path);
            StoreError::write_failed(table, e)
        })
    }

    fn contains(&self, table: &str) -> StoreResult<bool> {
        let path = self.table_path(table)?;
        match fs::metadata(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::read_failed(table, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::open(temp.path()).unwrap();

        let rows = vec![
            record(json!({"id": "u1", "name": "Laura"})),
            record(json!({"id": "u2", "name": "Ana"})),
        ];
        store.write("app_users", &rows).unwrap();

        assert_eq!(store.read("app_users").unwrap(), rows);
    }

    #[test]
    fn test_absent_vs_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::open(temp.path()).unwrap();

        assert!(!store.contains("audit_logs").unwrap());
        assert!(store.read("audit_logs").unwrap().is_empty());

        store.write("audit_logs", &[]).unwrap();
        assert!(store.contains("audit_logs").unwrap());
        assert!(store.read("audit_logs").unwrap().is_empty());
    }

    #[test]
    fn test_float_values_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let rows = vec![record(json!({"id": 1, "daily_conversion": 33.3}))];
        {
            let store = FileRecordStore::open(temp.path()).unwrap();
            store.write("app_targets", &rows).unwrap();
        }
        let store = FileRecordStore::open(temp.path()).unwrap();
        assert_eq!(store.read("app_targets").unwrap().len(), 1);
    }

    #[test]
    fn test_corruption_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::open(temp.path()).unwrap();
        store
            .write("bonus_rules", &[record(json!({"id": "b1", "amount": 5000}))])
            .unwrap();

        let path = store.root().join("bonus_rules.json");
        let contents = fs::read_to_string(&path).unwrap();
        fs::write(&path, contents.replace("5000", "9000")).unwrap();

        let err = store.read("bonus_rules").unwrap_err();
        assert!(matches!(err, StoreError::Corrupted { .. }));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::open(temp.path()).unwrap();
        store.write("kpi_entries", &[]).unwrap();

        let names: Vec<String> = fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["kpi_entries.json".to_string()]);
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::open(temp.path()).unwrap();
        // A directory in the table's place makes the final rename fail
        fs::create_dir(store.root().join("bonus_rules.json")).unwrap();

        let err = store
            .write("bonus_rules", &[record(json!({"id": "b1"}))])
            .unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed { .. }));
        assert!(!store.root().join("bonus_rules.json.tmp").exists());
    }

    #[test]
    fn test_checksum_detects_single_bit_flip() {
        let body = r#"[{"id":"u1"}]"#;
        let mut flipped = body.as_bytes().to_vec();
        flipped[3] ^= 0x01;
        let flipped = String::from_utf8(flipped).unwrap();
        assert_ne!(body_checksum(body), body_checksum(&flipped));
        assert_eq!(body_checksum(body), body_checksum(body));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::open(temp.path()).unwrap();
        assert!(matches!(
            store.read("../secrets"),
            Err(StoreError::InvalidTableName(_))
        ));
    }
}
