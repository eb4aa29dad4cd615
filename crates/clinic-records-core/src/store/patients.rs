//! Patient list operations.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{RecordStore, StoreError, StoreResult};
use crate::config::PATIENTS_SLOT;
use crate::models::{self, NewPatient, PatientRecord};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> RecordStore<S> {
    /// All records in insertion order.
    pub fn list(&self) -> &[PatientRecord] {
        &self.patients
    }

    /// Get a record by id.
    pub fn find_by_id(&self, id: &str) -> Option<&PatientRecord> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Append a new record with a freshly assigned id.
    pub fn create(&mut self, patient: NewPatient) -> StoreResult<PatientRecord> {
        let record = PatientRecord::from_new(self.next_id(), patient);

        let mut next = self.patients.clone();
        next.push(record.clone());
        self.commit_patients(next)?;

        debug!(id = %record.id, "Created patient");
        Ok(record)
    }

    /// Replace the record with the same id, keeping its position.
    pub fn update(&mut self, record: PatientRecord) -> StoreResult<()> {
        let position = self
            .position_of(&record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;

        let mut next = self.patients.clone();
        next[position] = record;
        self.commit_patients(next)
    }

    /// Remove a record, returning it.
    pub fn delete(&mut self, id: &str) -> StoreResult<PatientRecord> {
        let position = self
            .position_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut next = self.patients.clone();
        let removed = next.remove(position);
        self.commit_patients(next)?;

        debug!(id, "Deleted patient");
        Ok(removed)
    }

    /// Overwrite the whole list, e.g. when restoring a backup.
    ///
    /// Records are taken as-is (no merge); a list with repeated ids is
    /// rejected before anything changes.
    pub fn replace_all(&mut self, records: Vec<PatientRecord>) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id.as_str())) {
            return Err(StoreError::Validation(format!("duplicate patient id: {}", dup.id)));
        }
        self.commit_patients(records)
    }

    /// Records whose name or case number contains `term` (any case), or whose
    /// mobile number contains it verbatim. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&PatientRecord> {
        if term.is_empty() {
            return self.patients.iter().collect();
        }
        let needle = term.to_lowercase();
        self.patients
            .iter()
            .filter(|p| p.matches_search(&needle, term))
            .collect()
    }

    /// Drop every patient record and the stored list. Settings are kept.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.storage.remove(PATIENTS_SLOT)?;
        self.patients.clear();
        debug!(slot = PATIENTS_SLOT, "Cleared patient list");
        Ok(())
    }

    /// Suggested case number for a record created on `date`.
    pub fn suggest_case_number(&self, date: NaiveDate) -> String {
        models::suggest_case_number(date, self.patients.iter().map(|p| p.case_no.as_str()))
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.patients.iter().position(|p| p.id == id)
    }

    fn next_id(&self) -> String {
        unused_id(&self.patients)
    }

    /// Give each record that repeats an earlier id a fresh id, keeping the
    /// first occurrence, and persist the result. No-op when ids are unique.
    pub(super) fn reassign_duplicate_ids(&mut self) -> StoreResult<()> {
        let repeats: Vec<usize> = {
            let mut seen = HashSet::with_capacity(self.patients.len());
            self.patients
                .iter()
                .enumerate()
                .filter(|(_, p)| !seen.insert(p.id.as_str()))
                .map(|(i, _)| i)
                .collect()
        };
        if repeats.is_empty() {
            return Ok(());
        }

        let mut next = self.patients.clone();
        for i in repeats {
            let id = unused_id(&next);
            warn!(old = %next[i].id, new = %id, "Reassigned duplicate patient id");
            next[i].id = id;
        }
        self.commit_patients(next)
    }
}

fn unused_id(records: &[PatientRecord]) -> String {
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if records.iter().all(|p| p.id != id) {
            return id;
        }
    }
}
