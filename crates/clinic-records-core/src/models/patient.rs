//! Patient models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient gender as captured on the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// All genders in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// A stored patient record.
///
/// Free-text fields are never null: absent values are empty strings, both
/// when read from storage and when written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Store-assigned identifier, immutable after creation
    pub id: String,
    /// Human-assigned case label (not unique-enforced)
    pub case_no: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub mobile_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub family_history: String,
    #[serde(default)]
    pub general_complaint: String,
    #[serde(default)]
    pub mothers_name: String,
    #[serde(default)]
    pub fathers_name: String,
    #[serde(default)]
    pub medical_history: String,
    /// Photo URL, empty when none
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub payment: String,
}

/// Patient fields supplied by a caller before the store assigns an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub case_no: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub mobile_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub family_history: String,
    #[serde(default)]
    pub general_complaint: String,
    #[serde(default)]
    pub mothers_name: String,
    #[serde(default)]
    pub fathers_name: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub payment: String,
}

/// Required fields left blank on a patient form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl NewPatient {
    /// Create a new patient with the required fields; free text starts empty.
    pub fn new(
        case_no: String,
        name: String,
        age: u32,
        gender: Gender,
        mobile_number: String,
    ) -> Self {
        Self {
            case_no,
            name,
            age,
            gender,
            mobile_number,
            ..Default::default()
        }
    }

    /// Check required-field presence (case number, name, mobile number).
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(&self.case_no, &self.name, &self.mobile_number)
    }
}

impl PatientRecord {
    /// Build a stored record from caller fields and a store-assigned id.
    pub fn from_new(id: String, patient: NewPatient) -> Self {
        Self {
            id,
            case_no: patient.case_no,
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
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

    /// Check required-field presence (case number, name, mobile number).
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required(&self.case_no, &self.name, &self.mobile_number)
    }

    /// Case-insensitive match on name or case number, plain match on mobile.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str, raw_term: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.case_no.to_lowercase().contains(needle)
            || self.mobile_number.contains(raw_term)
    }
}

fn check_required(case_no: &str, name: &str, mobile_number: &str) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = [
        ("caseNo", case_no),
        ("name", name),
        ("mobileNumber", mobile_number),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

/// Suggest a case number of the form `CASE{YYYY}-{MM}-P{NN}`.
///
/// `NN` continues the month's sequence: one more than the number of existing
/// case numbers already carrying this month's prefix.
pub fn suggest_case_number<'a, I>(date: NaiveDate, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = format!("CASE{}-{:02}-P", date.year(), date.month());
    let taken = existing
        .into_iter()
        .filter(|case_no| case_no.starts_with(&prefix))
        .count();
    format!("{}{:02}", prefix, taken + 1)
}
