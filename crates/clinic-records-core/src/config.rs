//! Application-level constants.

/// Application name, used in log lines.
pub const APP_NAME: &str = "Clinic Records";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage slot holding the JSON array of patient records.
pub const PATIENTS_SLOT: &str = "patients";

/// Storage slot holding the JSON clinic settings object.
pub const SETTINGS_SLOT: &str = "clinicSettings";

/// Records shown in the dashboard's recent list.
pub const RECENT_PATIENTS_LIMIT: usize = 5;

/// Complaints shown in the report's frequency ranking.
pub const TOP_COMPLAINTS_LIMIT: usize = 5;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "clinic_records_core=debug"
    } else {
        "clinic_records_core=info"
    }
}
