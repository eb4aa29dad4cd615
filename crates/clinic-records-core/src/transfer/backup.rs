//! Backup document: full patient list plus clinic settings.

use serde::{Deserialize, Serialize};

use super::{TransferError, TransferResult};
use crate::models::{ClinicSettings, PatientRecord};

/// Interchange document `{ "patients": [...], "settings": {...} }`.
///
/// Either section may be absent on import; an absent section leaves the
/// corresponding live state untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BackupDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<PatientRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<ClinicSettings>,
}

impl BackupDocument {
    /// Export to pretty-printed JSON.
    pub fn to_json(&self) -> TransferResult<String> {
        serde_json::to_string_pretty(self).map_err(TransferError::Serialize)
    }

    /// Split into the patient list and settings sections.
    pub fn into_parts(self) -> (Option<Vec<PatientRecord>>, Option<ClinicSettings>) {
        (self.patients, self.settings)
    }
}

/// Build a complete backup of the given records and settings.
pub fn export_backup(records: &[PatientRecord], settings: &ClinicSettings) -> BackupDocument {
    BackupDocument {
        patients: Some(records.to_vec()),
        settings: Some(settings.clone()),
    }
}

/// Parse a backup document.
///
/// Text that is not valid JSON, or whose sections have the wrong shape,
/// fails with [`TransferError::Parse`].
pub fn import_backup(text: &str) -> TransferResult<BackupDocument> {
    serde_json::from_str(text).map_err(TransferError::Parse)
}
