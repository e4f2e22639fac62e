//! Local persistence mirror.
//!
//! Keeps the ordered list of submitted records and writes it back in full
//! after every change. The list is the unit of persistence: there are no
//! per-record writes.

use tracing::{debug, warn};

use crate::error::Result;
use crate::record::StoredRecord;
use crate::storage::Storage;

/// Key under which the list is stored.
pub const DEFAULT_STORAGE_KEY: &str = "travelDataList";

/// Where the record list lives between runs.
pub trait RecordStore {
    /// Load the full list.
    ///
    /// Missing or unparsable content yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backing store itself fails.
    fn load(&self) -> Result<Vec<StoredRecord>>;

    /// Overwrite the stored list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written.
    fn save(&mut self, records: &[StoredRecord]) -> Result<()>;
}

/// [`RecordStore`] backed by one key of a [`Storage`].
#[derive(Debug)]
pub struct LocalRecordStore {
    storage: Storage,
    key: String,
}

impl LocalRecordStore {
    /// Use `key` of `storage` for the list.
    #[must_use]
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// The key the list is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl RecordStore for LocalRecordStore {
    fn load(&self) -> Result<Vec<StoredRecord>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            debug!("No stored list under '{}'", self.key);
            return Ok(Vec::new());
        };
        Ok(parse_list(&raw, &self.key))
    }

    fn save(&mut self, records: &[StoredRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.storage.set_item(&self.key, &raw)
    }
}

/// In-memory [`RecordStore`] holding the serialized blob, for tests and
/// dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    blob: Option<String>,
    saves: usize,
}

impl MemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `blob`.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    /// The serialized list as last written.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// How many times the list was written.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Vec<StoredRecord>> {
        Ok(self
            .blob
            .as_deref()
            .map(|raw| parse_list(raw, "memory"))
            .unwrap_or_default())
    }

    fn save(&mut self, records: &[StoredRecord]) -> Result<()> {
        self.blob = Some(serde_json::to_string(records)?);
        self.saves += 1;
        Ok(())
    }
}

/// Parse a stored list, falling back to empty on bad content.
fn parse_list(raw: &str, key: &str) -> Vec<StoredRecord> {
    match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("Ignoring unparsable record list under '{}': {}", key, e);
            Vec::new()
        }
    }
}

/// The in-memory list plus the store it mirrors to.
#[derive(Debug)]
pub struct RecordMirror<S> {
    store: S,
    records: Vec<StoredRecord>,
}

impl<S: RecordStore> RecordMirror<S> {
    /// Load the list from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn open(store: S) -> Result<Self> {
        let records = store.load()?;
        debug!("Loaded {} stored records", records.len());
        Ok(Self { store, records })
    }

    /// The records, in submission order.
    #[must_use]
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a record and rewrite the stored list.
    ///
    /// If the write fails the in-memory list is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be written.
    pub fn push(&mut self, record: StoredRecord) -> Result<()> {
        if self.records.iter().any(|existing| existing.id == record.id) {
            warn!("Record id '{}' is already in the list", record.id);
        }

        self.records.push(record);
        if let Err(e) = self.store.save(&self.records) {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }
}
