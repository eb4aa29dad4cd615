//! Backup export and restore against live store state.

use tracing::info;

use super::{RecordStore, StoreResult};
use crate::storage::KeyValueStore;
use crate::transfer::{self, BackupDocument};

/// What a restore replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Number of patients restored, `None` when the document had no patient list
    pub patients_restored: Option<usize>,
    pub settings_restored: bool,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Snapshot the full store as a backup document.
    pub fn export_backup(&self) -> BackupDocument {
        transfer::export_backup(&self.patients, &self.settings)
    }

    /// Tabular report of the current patient list.
    pub fn export_tabular(&self) -> String {
        transfer::export_tabular(&self.patients)
    }

    /// Parse a backup document and apply the sections it contains.
    ///
    /// The document is fully parsed before anything is written, so a
    /// malformed document leaves both patients and settings untouched.
    pub fn restore_backup(&mut self, text: &str) -> StoreResult<RestoreSummary> {
        let (patients, settings) = transfer::import_backup(text)?.into_parts();

        let mut summary = RestoreSummary {
            patients_restored: None,
            settings_restored: false,
        };

        if let Some(patients) = patients {
            let count = patients.len();
            self.replace_all(patients)?;
            summary.patients_restored = Some(count);
        }
        if let Some(settings) = settings {
            self.save_settings(settings)?;
            summary.settings_restored = true;
        }

        info!(
            patients = ?summary.patients_restored,
            settings = summary.settings_restored,
            "Backup restored"
        );
        Ok(summary)
    }
}
