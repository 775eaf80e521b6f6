use std::fmt;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord};
use crate::error::RangeError;

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "ALL";

/// Bounds and step of the payload range slider, in kg.
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10_000.0;
pub const SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Site predicate
// ---------------------------------------------------------------------------

/// The categorical half of the selection: one site, or all of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value. `"ALL"` and the empty string select everything.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Fall back to [`SiteSelection::All`] when the site is not in the dataset.
    pub fn resolve(self, dataset: &LaunchDataset) -> Self {
        match self {
            SiteSelection::Site(site) if !dataset.has_site(&site) => {
                log::debug!("Unknown launch site {site:?}; showing all sites");
                SiteSelection::All
            }
            other => other,
        }
    }

    /// The raw dropdown value.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    /// Human-readable label used in chart titles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric predicate
// ---------------------------------------------------------------------------

/// Closed payload interval `[low, high]` with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(RangeError::NotFinite { low, high });
        }
        if low > high {
            return Err(RangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    /// The whole slider, `[0, 10000]`.
    pub fn full_slider() -> Self {
        Self {
            low: SLIDER_MIN,
            high: SLIDER_MAX,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

impl Default for PayloadRange {
    fn default() -> Self {
        Self::full_slider()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records matching both the site and the payload predicate, in dataset order.
///
/// A record passes when:
/// * the site selection is [`SiteSelection::All`] or equals the record's site
/// * its payload mass lies in `range` (bounds included)
pub fn filter<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records
        .iter()
        .filter(|rec| site.matches(rec) && range.contains(rec.payload_mass))
        .collect()
}
