//! Clinic settings model.

use serde::{Deserialize, Serialize};

/// UI theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

/// Singleton clinic settings, persisted independently of patient records.
///
/// Missing fields take their default when read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicSettings {
    pub clinic_name: String,
    pub doctor_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Show reminders in the UI
    pub notifications: bool,
    pub auto_backup: bool,
    pub theme: Theme,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            clinic_name: "Healthcare Clinic".to_string(),
            doctor_name: "Dr. Smith".to_string(),
            address: "123 Medical Street".to_string(),
            phone: "+1 234 567 8900".to_string(),
            email: "clinic@healthcare.com".to_string(),
            notifications: true,
            auto_backup: true,
            theme: Theme::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ClinicSettings =
            serde_json::from_str(r#"{"clinicName":"North Clinic","theme":"dark"}"#).unwrap();
        assert_eq!(settings.clinic_name, "North Clinic");
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.doctor_name, "Dr. Smith");
        assert!(settings.auto_backup);
    }

    #[test]
    fn test_settings_wire_names() {
        let json = serde_json::to_value(ClinicSettings::default()).unwrap();
        assert_eq!(json["autoBackup"], true);
        assert_eq!(json["theme"], "light");
        assert_eq!(json["clinicName"], "Healthcare Clinic");
    }
}
