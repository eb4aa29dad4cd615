//! Property tests over arbitrary record lists.

use clinic_records_core::models::{Gender, NewPatient, PatientRecord};
use clinic_records_core::stats::{age_histogram, average_age, top_complaints};
use clinic_records_core::storage::MemoryStorage;
use clinic_records_core::store::RecordStore;
use proptest::prelude::*;

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)]
}

fn patient_strategy() -> impl Strategy<Value = NewPatient> {
    (
        "[A-Za-z ]{1,12}",
        "C-[0-9]{1,4}",
        0u32..120,
        gender_strategy(),
        "[0-9]{4,10}",
        prop_oneof![Just(""), Just("flu"), Just("FLU"), Just("cold"), Just("back pain")],
    )
        .prop_map(|(name, case_no, age, gender, mobile, complaint)| {
            let mut patient = NewPatient::new(case_no, name, age, gender, mobile);
            patient.general_complaint = complaint.to_string();
            patient
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<PatientRecord>> {
    prop::collection::vec(patient_strategy(), 0..40).prop_map(|patients| {
        patients
            .into_iter()
            .enumerate()
            .map(|(i, p)| PatientRecord::from_new(i.to_string(), p))
            .collect()
    })
}

proptest! {
    #[test]
    fn histogram_counts_every_record_once(records in records_strategy()) {
        let histogram = age_histogram(&records);
        prop_assert_eq!(histogram.len(), 5);
        prop_assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), records.len());
    }

    #[test]
    fn average_age_within_range(records in records_strategy()) {
        let avg = average_age(&records);
        match (records.iter().map(|r| r.age).min(), records.iter().map(|r| r.age).max()) {
            (Some(min), Some(max)) => prop_assert!(min <= avg && avg <= max),
            _ => prop_assert_eq!(avg, 0),
        }
    }

    #[test]
    fn top_complaints_sorted_and_bounded(records in records_strategy(), n in 0usize..6) {
        let top = top_complaints(&records, n);
        prop_assert!(top.len() <= n);
        prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(top.iter().all(|c| !c.complaint.is_empty()));
    }

    #[test]
    fn creates_keep_order_and_unique_ids(
        patients in prop::collection::vec(patient_strategy(), 0..25),
    ) {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        for patient in &patients {
            store.create(patient.clone()).unwrap();
        }

        let names: Vec<&str> = store.list().iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<&str> = patients.iter().map(|p| p.name.as_str()).collect();
        prop_assert_eq!(names, expected);

        let mut ids: Vec<&str> = store.list().iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), patients.len());
    }

    #[test]
    fn search_preserves_insertion_order(
        patients in prop::collection::vec(patient_strategy(), 0..25),
        term in "[a-z]{0,2}",
    ) {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        for patient in patients {
            store.create(patient).unwrap();
        }

        let positions: Vec<usize> = store
            .search(&term)
            .iter()
            .filter_map(|hit| store.list().iter().position(|r| r.id == hit.id))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
