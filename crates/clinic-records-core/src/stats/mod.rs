//! Aggregation over a snapshot of patient records.
//!
//! Every function is a pure recomputation from its input slice: no caching,
//! no clock, no randomness. Identical input yields identical output.

mod summary;

pub use summary::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Gender, PatientRecord};

/// Record counts per gender.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

impl GenderCounts {
    pub fn get(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.male + self.female + self.other
    }

    /// Rounded share of `gender` in whole percent; 0 when there are no records.
    pub fn percent(&self, gender: Gender) -> u32 {
        percent(self.get(gender), self.total())
    }
}

/// Fixed age ranges for the report histogram, upper bounds inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    UpTo18,
    From19To35,
    From36To50,
    From51To65,
    Over65,
}

impl AgeBucket {
    /// All buckets in ascending age order.
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::UpTo18,
        AgeBucket::From19To35,
        AgeBucket::From36To50,
        AgeBucket::From51To65,
        AgeBucket::Over65,
    ];

    pub fn for_age(age: u32) -> Self {
        match age {
            0..=18 => AgeBucket::UpTo18,
            19..=35 => AgeBucket::From19To35,
            36..=50 => AgeBucket::From36To50,
            51..=65 => AgeBucket::From51To65,
            _ => AgeBucket::Over65,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::UpTo18 => "0-18",
            AgeBucket::From19To35 => "19-35",
            AgeBucket::From36To50 => "36-50",
            AgeBucket::From51To65 => "51-65",
            AgeBucket::Over65 => "65+",
        }
    }
}

/// One histogram bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketCount {
    pub bucket: AgeBucket,
    pub count: usize,
}

/// One entry of the complaint frequency ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplaintCount {
    /// Lowercased complaint text
    pub complaint: String,
    pub count: usize,
}

/// Count records per gender.
pub fn count_by_gender(records: &[PatientRecord]) -> GenderCounts {
    records.iter().fold(GenderCounts::default(), |mut counts, record| {
        match record.gender {
            Gender::Male => counts.male += 1,
            Gender::Female => counts.female += 1,
            Gender::Other => counts.other += 1,
        }
        counts
    })
}

/// Mean age rounded half-up to a whole year; 0 for an empty list.
pub fn average_age(records: &[PatientRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let n = records.len() as u64;
    let sum: u64 = records.iter().map(|r| u64::from(r.age)).sum();
    ((2 * sum + n) / (2 * n)) as u32
}

/// The last `n` records added, most recent first.
pub fn most_recent(records: &[PatientRecord], n: usize) -> Vec<PatientRecord> {
    records.iter().rev().take(n).cloned().collect()
}

/// Count records per age bucket. Every bucket is present, in ascending order.
pub fn age_histogram(records: &[PatientRecord]) -> Vec<BucketCount> {
    let mut counts = [0usize; AgeBucket::ALL.len()];
    for record in records {
        // ALL is declared in variant order
        counts[AgeBucket::for_age(record.age) as usize] += 1;
    }

    AgeBucket::ALL
        .iter()
        .zip(counts)
        .map(|(bucket, count)| BucketCount {
            bucket: *bucket,
            count,
        })
        .collect()
}

/// Most frequent complaints, grouped case-insensitively.
///
/// Empty complaints are skipped. Sorted by count descending; ties keep the
/// order in which each complaint was first seen.
pub fn top_complaints(records: &[PatientRecord], n: usize) -> Vec<ComplaintCount> {
    let mut ranking: Vec<ComplaintCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        if record.general_complaint.is_empty() {
            continue;
        }
        let key = record.general_complaint.to_lowercase();
        match index.get(&key) {
            Some(&i) => {
                if let Some(entry) = ranking.get_mut(i) {
                    entry.count += 1;
                }
            }
            None => {
                index.insert(key.clone(), ranking.len());
                ranking.push(ComplaintCount {
                    complaint: key,
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order breaks ties
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(n);
    ranking
}

/// `count / total` in whole percent, rounded half-up; 0 when `total` is 0.
pub fn percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (count, total) = (count as u64, total as u64);
    ((200 * count + total) / (2 * total)) as u32
}
