//! Flat comma-separated report export.

use crate::models::PatientRecord;

/// Fixed header row of the tabular report.
pub const TABULAR_HEADER: [&str; 8] = [
    "Case No",
    "Name",
    "Age",
    "Gender",
    "Mobile",
    "Address",
    "Complaint",
    "Medical History",
];

/// Export records as CSV text, one row per record in list order.
///
/// Every data field is quoted; embedded quotes are doubled. Rows are
/// separated by `\n` with no trailing newline.
pub fn export_tabular(records: &[PatientRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(TABULAR_HEADER.join(","));

    for record in records {
        let age = record.age.to_string();
        let fields = [
            record.case_no.as_str(),
            record.name.as_str(),
            age.as_str(),
            record.gender.as_str(),
            record.mobile_number.as_str(),
            record.address.as_str(),
            record.general_complaint.as_str(),
            record.medical_history.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|field| quote_field(field)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Wrap a field in double quotes, doubling any embedded quote.
fn quote_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewPatient};

    fn make_record(name: &str, complaint: &str) -> PatientRecord {
        let mut patient = NewPatient::new(
            "CASE2024-01-P01".into(),
            name.into(),
            42,
            Gender::Male,
            "0300-1234567".into(),
        );
        patient.address = "12 Main St, Lahore".into();
        patient.general_complaint = complaint.into();
        PatientRecord::from_new("id-1".into(), patient)
    }

    #[test]
    fn test_header_only_for_empty_list() {
        assert_eq!(
            export_tabular(&[]),
            "Case No,Name,Age,Gender,Mobile,Address,Complaint,Medical History"
        );
    }

    #[test]
    fn test_rows_quote_every_field() {
        let csv = export_tabular(&[make_record("Ali Khan", "fever")]);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            r#""CASE2024-01-P01","Ali Khan","42","Male","0300-1234567","12 Main St, Lahore","fever","""#
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_quote_escaping() {
        assert_eq!(quote_field("simple"), "\"simple\"");
        assert_eq!(quote_field("with,comma"), "\"with,comma\"");
        assert_eq!(quote_field("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_row_order_follows_list() {
        let csv = export_tabular(&[make_record("First", ""), make_record("Second", "")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].contains("First"));
        assert!(lines[2].contains("Second"));
    }
}
