//! Backup and report transfer formats.
//!
//! Both directions are stateless transforms over a record list; applying a
//! parsed backup to live state is the store's job.

mod backup;
mod tabular;

pub use backup::*;
pub use tabular::*;

use chrono::NaiveDate;
use thiserror::Error;

/// Transfer errors.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("Malformed backup document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type TransferResult<T> = Result<T, TransferError>;

/// Download name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("patient-data-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Download name for a tabular report generated on `date`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("patients-report-{}.csv", date.format("%Y-%m-%d"))
}
