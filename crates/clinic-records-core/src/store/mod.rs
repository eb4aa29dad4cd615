//! Record store: the canonical patient list and its durable copy.
//!
//! Every mutation follows the same transaction: build the next list, write
//! it to the `patients` slot, then swap it in. A failed write leaves the
//! in-memory list untouched.

mod backup;
mod patients;
mod settings;

pub use backup::*;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{PATIENTS_SLOT, SETTINGS_SLOT};
use crate::models::{ClinicSettings, PatientRecord};
use crate::storage::{KeyValueStore, StorageError};
use crate::transfer::TransferError;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Owns the patient list and clinic settings for the process lifetime.
pub struct RecordStore<S: KeyValueStore> {
    storage: S,
    patients: Vec<PatientRecord>,
    settings: ClinicSettings,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Hydrate a store from its storage slots.
    ///
    /// A missing slot starts empty (or default settings). A slot holding
    /// malformed content is treated the same way and logged. Records that
    /// repeat an earlier id get a fresh one and the repaired list is written
    /// back. Backend failures are returned as errors.
    pub fn open(storage: S) -> StoreResult<Self> {
        let patients: Vec<PatientRecord> = load_slot(&storage, PATIENTS_SLOT)?.unwrap_or_default();
        let settings: ClinicSettings = load_slot(&storage, SETTINGS_SLOT)?.unwrap_or_default();

        let mut store = Self {
            storage,
            patients,
            settings,
        };
        store.reassign_duplicate_ids()?;

        info!(patients = store.patients.len(), "Record store opened");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    /// Total bytes held across all storage slots.
    pub fn storage_usage_bytes(&self) -> StoreResult<u64> {
        Ok(self.storage.usage_bytes()?)
    }

    /// Write `next` to the patients slot, then make it the live list.
    fn commit_patients(&mut self, next: Vec<PatientRecord>) -> StoreResult<()> {
        let json = serde_json::to_string(&next)?;
        self.storage.set(PATIENTS_SLOT, &json)?;
        debug!(slot = PATIENTS_SLOT, records = next.len(), "Persisted patient list");
        self.patients = next;
        Ok(())
    }
}

fn load_slot<S, T>(storage: &S, key: &str) -> StoreResult<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let Some(text) = storage.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&text) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(slot = key, error = %e, "Malformed slot content, starting from defaults");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_open_empty_storage() {
        let store = RecordStore::open(MemoryStorage::new()).unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.settings(), &ClinicSettings::default());
    }

    #[test]
    fn test_open_corrupted_patients_slot() {
        let storage = MemoryStorage::new().with_slot(PATIENTS_SLOT, "{not json");
        let store = RecordStore::open(storage).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_open_wrong_shape_slot() {
        let storage = MemoryStorage::new()
            .with_slot(PATIENTS_SLOT, "null")
            .with_slot(SETTINGS_SLOT, "[1,2,3]");
        let store = RecordStore::open(storage).unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.settings(), &ClinicSettings::default());
    }

    #[test]
    fn test_open_reassigns_duplicate_ids() {
        let storage = MemoryStorage::new().with_slot(
            PATIENTS_SLOT,
            r#"[
                {"id":"1700000000000","caseNo":"C-1","name":"Ali","age":40,"gender":"Male","mobileNumber":"111"},
                {"id":"1700000000000","caseNo":"C-2","name":"Sara","age":30,"gender":"Female","mobileNumber":"222"}
            ]"#,
        );
        let mut store = RecordStore::open(storage).unwrap();

        let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ali", "Sara"]);
        assert_eq!(store.list()[0].id, "1700000000000");
        let sara_id = store.list()[1].id.clone();
        assert_ne!(sara_id, "1700000000000");

        // The repaired ids are written back
        let reopened = RecordStore::open(store.storage().clone()).unwrap();
        assert_eq!(reopened.list(), store.list());

        store.delete("1700000000000").unwrap();
        assert!(store.find_by_id("1700000000000").is_none());
        assert_eq!(store.find_by_id(&sara_id).unwrap().name, "Sara");
    }

    #[test]
    fn test_open_existing_slot() {
        let storage = MemoryStorage::new().with_slot(
            PATIENTS_SLOT,
            r#"[{"id":"1","caseNo":"C-1","name":"Sara","age":30,"gender":"Female","mobileNumber":"555"}]"#,
        );
        let store = RecordStore::open(storage).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.list()[0].name, "Sara");
    }
}
