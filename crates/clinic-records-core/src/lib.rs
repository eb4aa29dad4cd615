//! Clinic Records Core Library
//!
//! Local-first patient record keeping for a single clinic: one canonical
//! record list, persisted after every change, with statistics and backups
//! computed on demand.
//!
//! # Architecture
//!
//! ```text
//!   UI (forms, lists, dashboard)
//!              │
//!              ▼
//!   ┌──────────────────────────┐        ┌──────────────────────┐
//!   │       RecordStore        │ ─────▶ │  KeyValueStore slot  │
//!   │  create/update/delete    │ persist│  "patients"          │
//!   │  replace_all/search      │        │  "clinicSettings"    │
//!   └────────────┬─────────────┘        └──────────────────────┘
//!                │ &[PatientRecord]
//!        ┌───────┴────────┐
//!        ▼                ▼
//!     stats            transfer
//!  (dashboard,      (backup JSON,
//!   reports)         CSV report)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, NewPatient, ClinicSettings)
//! - [`storage`]: Durable key-value slots (SQLite, in-memory)
//! - [`store`]: The record store and its mutate-then-persist operations
//! - [`stats`]: Aggregations for the dashboard and reports
//! - [`transfer`]: Backup document and tabular export
//! - [`config`]: Slot keys and limits
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod logging;
pub mod models;
pub mod stats;
pub mod storage;
pub mod store;
pub mod transfer;

// Re-export commonly used types
pub use models::{ClinicSettings, Gender, NewPatient, PatientRecord, Theme, ValidationError};
pub use stats::{AgeBucket, DashboardSummary, GenderCounts, ReportSummary};
pub use storage::{KeyValueStore, MemoryStorage, SqliteStorage};
pub use store::{RecordStore, RestoreSummary, StoreError};
pub use transfer::{BackupDocument, TransferError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicRecordsError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<storage::StorageError> for ClinicRecordsError {
    fn from(e: storage::StorageError) -> Self {
        ClinicRecordsError::StorageError(e.to_string())
    }
}

impl From<TransferError> for ClinicRecordsError {
    fn from(e: TransferError) -> Self {
        match e {
            TransferError::Parse(_) => ClinicRecordsError::ParseError(e.to_string()),
            TransferError::Serialize(_) => ClinicRecordsError::SerializationError(e.to_string()),
        }
    }
}

impl From<StoreError> for ClinicRecordsError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ClinicRecordsError::NotFound(id),
            StoreError::Validation(msg) => ClinicRecordsError::ValidationError(msg),
            StoreError::Transfer(e) => e.into(),
            StoreError::Storage(e) => e.into(),
            StoreError::Json(e) => ClinicRecordsError::SerializationError(e.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicRecordsError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicRecordsError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a record store at the given path.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<ClinicRecordsCore>, ClinicRecordsError> {
    let storage = SqliteStorage::open(&path)?;
    Ok(Arc::new(ClinicRecordsCore {
        store: Mutex::new(RecordStore::open(storage)?),
    }))
}

/// Create an in-memory record store (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<ClinicRecordsCore>, ClinicRecordsError> {
    let storage = SqliteStorage::open_in_memory()?;
    Ok(Arc::new(ClinicRecordsCore {
        store: Mutex::new(RecordStore::open(storage)?),
    }))
}

/// Install the process-wide tracing subscriber. Returns false if one exists.
#[uniffi::export]
pub fn init_logging() -> bool {
    logging::init_tracing()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe record store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct ClinicRecordsCore {
    store: Mutex<RecordStore<SqliteStorage>>,
}

#[uniffi::export]
impl ClinicRecordsCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// All patients in insertion order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.list().iter().cloned().map(Into::into).collect())
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.find_by_id(&id).cloned().map(Into::into))
    }

    /// Create a new patient.
    pub fn create_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, ClinicRecordsError> {
        let mut store = self.store.lock()?;
        let record = store.create(patient.into())?;
        Ok(record.into())
    }

    /// Replace an existing patient, matched by id.
    pub fn update_patient(&self, patient: FfiPatient) -> Result<(), ClinicRecordsError> {
        let mut store = self.store.lock()?;
        store.update(patient.into())?;
        Ok(())
    }

    /// Delete a patient by id.
    pub fn delete_patient(&self, id: String) -> Result<(), ClinicRecordsError> {
        let mut store = self.store.lock()?;
        store.delete(&id)?;
        Ok(())
    }

    /// Search by name, case number, or mobile number.
    pub fn search_patients(&self, term: String) -> Result<Vec<FfiPatient>, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.search(&term).into_iter().cloned().map(Into::into).collect())
    }

    /// Remove all patient records. Settings are kept.
    pub fn clear_patients(&self) -> Result<(), ClinicRecordsError> {
        let mut store = self.store.lock()?;
        store.clear()?;
        Ok(())
    }

    /// Suggested case number for a patient registered today.
    pub fn suggest_case_number(&self) -> Result<String, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.suggest_case_number(today()))
    }

    /// Names of required fields left blank; empty when the form is complete.
    pub fn missing_required_fields(&self, patient: FfiNewPatient) -> Vec<String> {
        let patient: NewPatient = patient.into();
        match patient.validate() {
            Ok(()) => Vec::new(),
            Err(e) => e.missing.into_iter().map(String::from).collect(),
        }
    }

    // =========================================================================
    // Settings Operations
    // =========================================================================

    /// Current clinic settings.
    pub fn get_settings(&self) -> Result<FfiClinicSettings, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.settings().clone().into())
    }

    /// Save clinic settings.
    pub fn save_settings(&self, settings: FfiClinicSettings) -> Result<(), ClinicRecordsError> {
        let mut store = self.store.lock()?;
        store.save_settings(settings.into())?;
        Ok(())
    }

    /// Bytes used by all stored data.
    pub fn storage_usage_bytes(&self) -> Result<u64, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.storage_usage_bytes()?)
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Dashboard figures for the current patient list.
    pub fn dashboard_summary(&self) -> Result<FfiDashboardSummary, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(DashboardSummary::from_records(store.list()).into())
    }

    /// Report figures for the current patient list.
    pub fn report_summary(&self) -> Result<FfiReportSummary, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(ReportSummary::from_records(store.list()).into())
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    /// Export patients and settings as a backup JSON document.
    pub fn export_backup_json(&self) -> Result<String, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.export_backup().to_json()?)
    }

    /// Restore from a backup JSON document.
    pub fn restore_backup_json(
        &self,
        json: String,
    ) -> Result<FfiRestoreSummary, ClinicRecordsError> {
        let mut store = self.store.lock()?;
        Ok(store.restore_backup(&json)?.into())
    }

    /// Export patients as a CSV report.
    pub fn export_report_csv(&self) -> Result<String, ClinicRecordsError> {
        let store = self.store.lock()?;
        Ok(store.export_tabular())
    }

    /// File name for a backup taken today.
    pub fn backup_file_name(&self) -> String {
        transfer::backup_file_name(today())
    }

    /// File name for a report generated today.
    pub fn report_file_name(&self) -> String {
        transfer::report_file_name(today())
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiGender {
    Male,
    Female,
    Other,
}

impl From<Gender> for FfiGender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => FfiGender::Male,
            Gender::Female => FfiGender::Female,
            Gender::Other => FfiGender::Other,
        }
    }
}

impl From<FfiGender> for Gender {
    fn from(gender: FfiGender) -> Self {
        match gender {
            FfiGender::Male => Gender::Male,
            FfiGender::Female => Gender::Female,
            FfiGender::Other => Gender::Other,
        }
    }
}

/// FFI-safe theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiTheme {
    Light,
    Dark,
    Auto,
}

impl From<Theme> for FfiTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => FfiTheme::Light,
            Theme::Dark => FfiTheme::Dark,
            Theme::Auto => FfiTheme::Auto,
        }
    }
}

impl From<FfiTheme> for Theme {
    fn from(theme: FfiTheme) -> Self {
        match theme {
            FfiTheme::Light => Theme::Light,
            FfiTheme::Dark => Theme::Dark,
            FfiTheme::Auto => Theme::Auto,
        }
    }
}

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub case_no: String,
    pub name: String,
    pub age: u32,
    pub gender: FfiGender,
    pub mobile_number: String,
    pub address: String,
    pub family_history: String,
    pub general_complaint: String,
    pub mothers_name: String,
    pub fathers_name: String,
    pub medical_history: String,
    pub photo: String,
    pub payment: String,
}

impl From<PatientRecord> for FfiPatient {
    fn from(record: PatientRecord) -> Self {
        Self {
            id: record.id,
            case_no: record.case_no,
            name: record.name,
            age: record.age,
            gender: record.gender.into(),
            mobile_number: record.mobile_number,
            address: record.address,
            family_history: record.family_history,
            general_complaint: record.general_complaint,
            mothers_name: record.mothers_name,
            fathers_name: record.fathers_name,
            medical_history: record.medical_history,
            photo: record.photo,
            payment: record.payment,
        }
    }
}

impl From<FfiPatient> for PatientRecord {
    fn from(patient: FfiPatient) -> Self {
        PatientRecord {
            id: patient.id,
            case_no: patient.case_no,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.into(),
            mobile_number: patient.mobile_number,
            address: patient.address,
            family_history: patient.family_history,
            general_complaint: patient.general_complaint,
            mothers_name: patient.mothers_name,
            fathers_name: patient.fathers_name,
            medical_history: patient.medical_history,
            photo: patient.photo,
            payment: patient.payment,
        }
    }
}

/// FFI-safe patient form (no id yet).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub case_no: String,
    pub name: String,
    pub age: u32,
    pub gender: FfiGender,
    pub mobile_number: String,
    pub address: String,
    pub family_history: String,
    pub general_complaint: String,
    pub mothers_name: String,
    pub fathers_name: String,
    pub medical_history: String,
    pub photo: String,
    pub payment: String,
}

impl From<FfiNewPatient> for NewPatient {
    fn from(patient: FfiNewPatient) -> Self {
        NewPatient {
            case_no: patient.case_no,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.into(),
            mobile_number: patient.mobile_number,
            address: patient.address,
            family_history: patient.family_history,
            general_complaint: patient.general_complaint,
            mothers_name: patient.mothers_name,
            fathers_name: patient.fathers_name,
            medical_history: patient.medical_history,
            photo: patient.photo,
            payment: patient.payment,
        }
    }
}

/// FFI-safe clinic settings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicSettings {
    pub clinic_name: String,
    pub doctor_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub notifications: bool,
    pub auto_backup: bool,
    pub theme: FfiTheme,
}

impl From<ClinicSettings> for FfiClinicSettings {
    fn from(settings: ClinicSettings) -> Self {
        Self {
            clinic_name: settings.clinic_name,
            doctor_name: settings.doctor_name,
            address: settings.address,
            phone: settings.phone,
            email: settings.email,
            notifications: settings.notifications,
            auto_backup: settings.auto_backup,
            theme: settings.theme.into(),
        }
    }
}

impl From<FfiClinicSettings> for ClinicSettings {
    fn from(settings: FfiClinicSettings) -> Self {
        ClinicSettings {
            clinic_name: settings.clinic_name,
            doctor_name: settings.doctor_name,
            address: settings.address,
            phone: settings.phone,
            email: settings.email,
            notifications: settings.notifications,
            auto_backup: settings.auto_backup,
            theme: settings.theme.into(),
        }
    }
}

/// FFI-safe gender share.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGenderStat {
    pub gender: FfiGender,
    pub count: u32,
    pub percent: u32,
}

fn gender_stats(counts: &GenderCounts) -> Vec<FfiGenderStat> {
    Gender::ALL
        .iter()
        .map(|gender| FfiGenderStat {
            gender: (*gender).into(),
            count: counts.get(*gender) as u32,
            percent: counts.percent(*gender),
        })
        .collect()
}

/// FFI-safe dashboard summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardSummary {
    pub total_patients: u32,
    pub average_age: u32,
    pub genders: Vec<FfiGenderStat>,
    pub recent_patients: Vec<FfiPatient>,
}

impl From<DashboardSummary> for FfiDashboardSummary {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_patients: summary.total_patients as u32,
            average_age: summary.average_age,
            genders: gender_stats(&summary.genders),
            recent_patients: summary.recent_patients.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe age group bar.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAgeGroup {
    pub label: String,
    pub count: u32,
    pub percent: u32,
}

/// FFI-safe complaint ranking entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiComplaintCount {
    pub complaint: String,
    pub count: u32,
}

/// FFI-safe report summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReportSummary {
    pub total_patients: u32,
    pub average_age: u32,
    pub genders: Vec<FfiGenderStat>,
    pub age_groups: Vec<FfiAgeGroup>,
    pub top_complaints: Vec<FfiComplaintCount>,
}

impl From<ReportSummary> for FfiReportSummary {
    fn from(summary: ReportSummary) -> Self {
        let age_groups = summary
            .age_groups
            .iter()
            .map(|group| FfiAgeGroup {
                label: group.bucket.label().to_string(),
                count: group.count as u32,
                percent: summary.age_group_percent(group),
            })
            .collect();

        Self {
            total_patients: summary.total_patients as u32,
            average_age: summary.average_age,
            genders: gender_stats(&summary.genders),
            age_groups,
            top_complaints: summary
                .top_complaints
                .into_iter()
                .map(|c| FfiComplaintCount {
                    complaint: c.complaint,
                    count: c.count as u32,
                })
                .collect(),
        }
    }
}

/// FFI-safe restore result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRestoreSummary {
    pub patients_restored: Option<u32>,
    pub settings_restored: bool,
}

impl From<RestoreSummary> for FfiRestoreSummary {
    fn from(summary: RestoreSummary) -> Self {
        Self {
            patients_restored: summary.patients_restored.map(|n| n as u32),
            settings_restored: summary.settings_restored,
        }
    }
}
