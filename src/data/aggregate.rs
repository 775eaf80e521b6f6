use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchRecord, Outcome};

/// Launch count per outcome. Outcomes that never occur are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutcomeCounts(BTreeMap<Outcome, usize>);

impl OutcomeCounts {
    pub fn get(&self, outcome: Outcome) -> Option<usize> {
        self.0.get(&outcome).copied()
    }

    /// Number of records counted.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Share of successful launches, `None` when nothing was counted.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.get(Outcome::Success).unwrap_or(0) as f64 / total as f64)
    }

    /// `(outcome, count)` pairs, failures first.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, usize)> + '_ {
        self.0.iter().map(|(o, c)| (*o, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Group records by outcome and count each group.
pub fn aggregate_by_outcome<'a, I>(records: I) -> OutcomeCounts
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.outcome).or_insert(0) += 1;
    }
    OutcomeCounts(counts)
}
