// File-backed storage of named record collections.
//
// Each collection lives in `<data_dir>/<collection>.json` as a single JSON
// array. Every operation re-reads the whole file and every mutation rewrites
// it; there is no incremental I/O and no cross-process coordination beyond an
// exclusive file lock held for the duration of a write. The deployment
// assumption is a single writer process.

use crate::records::{Record, now_iso, record_id};
use eyre::{Context, Result, eyre};
use fs2::FileExt;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Store for named collections of JSON records.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Open or create a store rooted at the given data directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data_dir = path.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        Ok(Self { data_dir })
    }

    /// Directory this store reads and writes.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection))
    }

    /// All records in a collection.
    ///
    /// A missing file is an empty collection. An unreadable file or invalid
    /// content also degrades to an empty collection, with a warning for
    /// operator visibility; callers never see a read error.
    pub fn get_all(&self, collection: &str) -> Vec<Record> {
        let path = self.file_path(collection);
        if !path.exists() {
            return Vec::new();
        }

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!(collection, error = ?e, "Failed to read collection file");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Record>>(&data) {
            Ok(records) => records,
            Err(e) => {
                warn!(collection, error = ?e, "Collection file holds invalid JSON");
                Vec::new()
            }
        }
    }

    /// Find a record by its numeric id.
    pub fn get_by_id(&self, collection: &str, id: u64) -> Option<Record> {
        self.get_all(collection)
            .into_iter()
            .find(|record| record_id(record) == Some(id))
    }

    /// Create a record. The store assigns the next numeric id (one more than
    /// the largest existing numeric id, or 1 for an empty collection) and
    /// stamps `createdAt`; both override any caller-supplied values.
    pub fn create(&self, collection: &str, fields: Record) -> Result<Record> {
        Self::validate_collection_name(collection)?;

        let mut records = self.get_all(collection);
        let next_id = records
            .iter()
            .filter_map(record_id)
            .max()
            .map_or(1, |max| max + 1);

        let mut record = fields;
        record.insert("id".to_string(), Value::from(next_id));
        record.insert("createdAt".to_string(), Value::from(now_iso()));

        records.push(record.clone());
        self.write_collection(collection, &records)?;

        debug!(collection, id = next_id, "Created record");
        Ok(record)
    }

    /// Merge partial fields over an existing record. The original id is
    /// restored over any caller-supplied value and `updatedAt` is stamped.
    /// Returns `Ok(None)` when no record matches.
    pub fn update(&self, collection: &str, id: u64, updates: Record) -> Result<Option<Record>> {
        Self::validate_collection_name(collection)?;

        let mut records = self.get_all(collection);
        let Some(index) = records.iter().position(|r| record_id(r) == Some(id)) else {
            return Ok(None);
        };

        let mut updated = records[index].clone();
        for (key, value) in updates {
            updated.insert(key, value);
        }
        updated.insert("id".to_string(), Value::from(id));
        updated.insert("updatedAt".to_string(), Value::from(now_iso()));

        records[index] = updated.clone();
        self.write_collection(collection, &records)?;

        debug!(collection, id, "Updated record");
        Ok(Some(updated))
    }

    /// Remove a record by id. Returns whether a removal occurred; the file is
    /// rewritten only when it did.
    pub fn delete(&self, collection: &str, id: u64) -> Result<bool> {
        Self::validate_collection_name(collection)?;

        let mut records = self.get_all(collection);
        let before = records.len();
        records.retain(|record| record_id(record) != Some(id));

        if records.len() == before {
            return Ok(false);
        }

        self.write_collection(collection, &records)?;
        debug!(collection, id, "Deleted record");
        Ok(true)
    }

    /// Replace the entire collection with the given records.
    pub fn save_all(&self, collection: &str, records: &[Record]) -> Result<()> {
        Self::validate_collection_name(collection)?;
        self.write_collection(collection, records)
    }

    fn write_collection(&self, collection: &str, records: &[Record]) -> Result<()> {
        let path = self.file_path(collection);

        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&path)
            .context("Failed to open collection file for writing")?;

        // Exclusive lock for the duration of the rewrite
        file.lock_exclusive().context("Failed to acquire file lock")?;

        let json = serde_json::to_string_pretty(records)?;
        file.set_len(0)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        // Lock is released when the file is dropped
        Ok(())
    }

    fn validate_collection_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(eyre!("Collection name cannot be empty"));
        }
        if name.len() > 64 {
            return Err(eyre!("Collection name too long: {} (max 64 chars)", name));
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(eyre!(
                "Invalid collection name: {} (must be alphanumeric with _/-)",
                name
            ));
        }
        Ok(())
    }
}
