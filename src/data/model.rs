use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names as they appear in the launch records file
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_OUTCOME: &str = "class";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns that must be present for a file to load.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_SITE, COL_PAYLOAD, COL_OUTCOME];

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, encoded as `0` (failure) / `1` (success) in the source data.
///
/// Ordered so that `Failure < Success`; aggregate maps iterate in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Both outcomes, in display order.
    pub const ALL: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    /// The `class` code used in the data file.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Parse the textual cell value. Accepts `0`/`1` and their float forms (`1.0`).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(i) = text.parse::<i64>() {
            return Self::from_code(i);
        }
        match text.parse::<f64>() {
            Ok(f) if f == 0.0 => Some(Outcome::Failure),
            Ok(f) if f == 1.0 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.code()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch event (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    /// Payload mass in kilograms, never negative.
    pub payload_mass: f64,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_category: Option<String>,
}

impl LaunchRecord {
    /// A record with only the columns the dashboard filters on.
    pub fn new(site: impl Into<String>, payload_mass: f64, outcome: Outcome) -> Self {
        Self {
            site: site.into(),
            payload_mass,
            outcome,
            flight_number: None,
            booster_version: None,
            booster_category: None,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    /// All records, in file order.
    pub records: Vec<LaunchRecord>,
    pub min_payload: f64,
    pub max_payload: f64,
    /// Launch sites in order of first appearance.
    pub distinct_sites: Vec<String>,
}

impl LaunchDataset {
    /// Build summary statistics from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut distinct_sites = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            if seen.insert(rec.site.as_str()) {
                distinct_sites.push(rec.site.clone());
            }
            min_payload = min_payload.min(rec.payload_mass);
            max_payload = max_payload.max(rec.payload_mass);
        }

        if records.is_empty() {
            min_payload = 0.0;
            max_payload = 0.0;
        }

        LaunchDataset {
            records,
            min_payload,
            max_payload,
            distinct_sites,
        }
    }

    /// Whether `site` is one of the labels seen in the data.
    pub fn has_site(&self, site: &str) -> bool {
        self.distinct_sites.iter().any(|s| s == site)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_statistics_follow_file_order() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 500.0, Outcome::Failure),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Success),
            LaunchRecord::new("KSC LC-39A", 3100.0, Outcome::Success),
        ]);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 9600.0);
        assert_eq!(
            ds.distinct_sites,
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );
        assert!(ds.has_site("KSC LC-39A"));
        assert!(!ds.has_site("ALL"));
    }

    #[test]
    fn empty_dataset_has_zero_payload_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!((ds.min_payload, ds.max_payload), (0.0, 0.0));
        assert!(ds.distinct_sites.is_empty());
    }

    #[test]
    fn outcome_parses_integer_and_float_codes() {
        assert_eq!(Outcome::parse("1"), Some(Outcome::Success));
        assert_eq!(Outcome::parse(" 0 "), Some(Outcome::Failure));
        assert_eq!(Outcome::parse("1.0"), Some(Outcome::Success));
        assert_eq!(Outcome::parse("2"), None);
        assert_eq!(Outcome::parse("yes"), None);
        assert!(Outcome::Failure < Outcome::Success);
    }

    #[test]
    fn outcome_serializes_as_class_code() {
        let json = serde_json::to_string(&Outcome::Success).unwrap();
        assert_eq!(json, "1");
        let record = LaunchRecord::new("A", 10.0, Outcome::Failure);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["outcome"], 0);
    }
}
