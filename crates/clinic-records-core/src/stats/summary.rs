//! Dashboard and report summaries.

use serde::{Deserialize, Serialize};

use super::{
    age_histogram, average_age, count_by_gender, most_recent, percent, top_complaints,
    BucketCount, ComplaintCount, GenderCounts,
};
use crate::config::{RECENT_PATIENTS_LIMIT, TOP_COMPLAINTS_LIMIT};
use crate::models::PatientRecord;

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub total_patients: usize,
    pub genders: GenderCounts,
    pub average_age: u32,
    /// Most recently added first
    pub recent_patients: Vec<PatientRecord>,
}

impl DashboardSummary {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        Self {
            total_patients: records.len(),
            genders: count_by_gender(records),
            average_age: average_age(records),
            recent_patients: most_recent(records, RECENT_PATIENTS_LIMIT),
        }
    }
}

/// Figures shown on the reports page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub total_patients: usize,
    pub average_age: u32,
    pub genders: GenderCounts,
    pub age_groups: Vec<BucketCount>,
    pub top_complaints: Vec<ComplaintCount>,
}

impl ReportSummary {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        Self {
            total_patients: records.len(),
            average_age: average_age(records),
            genders: count_by_gender(records),
            age_groups: age_histogram(records),
            top_complaints: top_complaints(records, TOP_COMPLAINTS_LIMIT),
        }
    }

    /// Share of all patients falling in an age group, in whole percent.
    pub fn age_group_percent(&self, group: &BucketCount) -> u32 {
        percent(group.count, self.total_patients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewPatient};

    fn make_records(count: usize) -> Vec<PatientRecord> {
        (0..count)
            .map(|i| {
                let mut patient = NewPatient::new(
                    format!("C-{}", i),
                    format!("Patient {}", i),
                    (i as u32) * 10,
                    if i % 2 == 0 { Gender::Male } else { Gender::Female },
                    "555".into(),
                );
                patient.general_complaint = format!("complaint {}", i % 7);
                PatientRecord::from_new(i.to_string(), patient)
            })
            .collect()
    }

    #[test]
    fn test_dashboard_empty() {
        let summary = DashboardSummary::from_records(&[]);
        assert_eq!(summary.total_patients, 0);
        assert_eq!(summary.average_age, 0);
        assert!(summary.recent_patients.is_empty());
        assert_eq!(summary.genders.percent(Gender::Male), 0);
    }

    #[test]
    fn test_dashboard_limits_recent() {
        let summary = DashboardSummary::from_records(&make_records(8));
        assert_eq!(summary.total_patients, 8);
        assert_eq!(summary.recent_patients.len(), RECENT_PATIENTS_LIMIT);
        assert_eq!(summary.recent_patients[0].id, "7");
        assert_eq!(summary.genders.male, 4);
    }

    #[test]
    fn test_report_summary() {
        let summary = ReportSummary::from_records(&make_records(10));
        assert_eq!(summary.total_patients, 10);
        assert_eq!(summary.top_complaints.len(), TOP_COMPLAINTS_LIMIT);
        assert_eq!(summary.top_complaints[0].count, 2);

        // Ages 0..=90: 0,10 | 20,30 | 40,50 | 60 | 70,80,90
        let counts: Vec<usize> = summary.age_groups.iter().map(|g| g.count).collect();
        assert_eq!(counts, vec![2, 2, 2, 1, 3]);
        assert_eq!(summary.age_group_percent(&summary.age_groups[4]), 30);
    }
}
