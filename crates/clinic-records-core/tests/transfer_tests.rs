//! Backup and report export tests.

use clinic_records_core::models::{ClinicSettings, Gender, NewPatient, PatientRecord, Theme};
use clinic_records_core::transfer::{export_backup, export_tabular, import_backup, TransferError};

fn make_records() -> Vec<PatientRecord> {
    let mut first = NewPatient::new(
        "CASE2024-02-P01".into(),
        "Ali \"Sonny\" Khan".into(),
        52,
        Gender::Male,
        "+92 300 1234567".into(),
    );
    first.general_complaint = "Chest pain".into();
    first.medical_history = "Hypertension, type 2 diabetes".into();
    first.photo = "https://example.org/p/1.jpg".into();

    let mut second = NewPatient::new(
        "CASE2024-02-P02".into(),
        "Sara".into(),
        7,
        Gender::Female,
        "0321-9876543".into(),
    );
    second.mothers_name = "Ayesha".into();
    second.fathers_name = "Imran".into();

    vec![
        PatientRecord::from_new("a1".into(), first),
        PatientRecord::from_new("b2".into(), second),
    ]
}

#[test]
fn test_backup_round_trip() {
    let records = make_records();
    let settings = ClinicSettings {
        clinic_name: "Hillside".into(),
        theme: Theme::Auto,
        auto_backup: false,
        ..Default::default()
    };

    let json = export_backup(&records, &settings).to_json().unwrap();
    let (patients, restored_settings) = import_backup(&json).unwrap().into_parts();

    assert_eq!(patients, Some(records));
    assert_eq!(restored_settings, Some(settings));
}

#[test]
fn test_backup_document_shape() {
    let json = export_backup(&make_records(), &ClinicSettings::default())
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object["patients"].is_array());
    assert_eq!(object["patients"][1]["mothersName"], "Ayesha");
    assert_eq!(object["settings"]["doctorName"], "Dr. Smith");
}

#[test]
fn test_malformed_backup_is_parse_error() {
    for text in ["", "{", "patients: []", r#"{"patients":[{"id":1}]}"#] {
        assert!(
            matches!(import_backup(text), Err(TransferError::Parse(_))),
            "expected parse error for {:?}",
            text
        );
    }
}

#[test]
fn test_tabular_export() {
    let csv = export_tabular(&make_records());
    let lines: Vec<&str> = csv.split('\n').collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Case No,Name,Age,Gender,Mobile,Address,Complaint,Medical History"
    );
    assert_eq!(
        lines[1],
        r#""CASE2024-02-P01","Ali ""Sonny"" Khan","52","Male","+92 300 1234567","","Chest pain","Hypertension, type 2 diabetes""#
    );
    assert_eq!(
        lines[2],
        r#""CASE2024-02-P02","Sara","7","Female","0321-9876543","","","""#
    );
}
