use std::sync::Arc;

use serde::Serialize;

use crate::data::aggregate::{aggregate_by_outcome, OutcomeCounts};
use crate::data::filter::{filter, PayloadRange, SiteSelection};
use crate::data::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// View payloads
// ---------------------------------------------------------------------------

/// Data behind the success/failure pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieView {
    pub title: String,
    pub counts: OutcomeCounts,
}

/// Data behind the payload vs. outcome scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView<'a> {
    pub title: String,
    pub records: Vec<&'a LaunchRecord>,
}

/// Both chart payloads from one recomputation cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView<'a> {
    pub site: String,
    pub payload_range: PayloadRange,
    pub pie: PieView,
    pub scatter: ScatterView<'a>,
}

// ---------------------------------------------------------------------------
// Pure handlers: (dataset, selection) → view
// ---------------------------------------------------------------------------

/// Pie payload for the given selection.
pub fn pie_view(dataset: &LaunchDataset, site: &SiteSelection, range: PayloadRange) -> PieView {
    let rows = filter(dataset, site, range);
    PieView {
        title: format!("Launch Success vs Failure ({site})"),
        counts: aggregate_by_outcome(rows),
    }
}

/// Scatter payload for the given selection.
pub fn scatter_view<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterView<'a> {
    ScatterView {
        title: format!("Payload vs. Launch Success ({site})"),
        records: filter(dataset, site, range),
    }
}

/// Run one full cycle: filter once, feed the subset to both views.
pub fn dashboard_view<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> DashboardView<'a> {
    let filtered = filter(dataset, site, range);
    DashboardView {
        site: site.value().to_string(),
        payload_range: range,
        pie: PieView {
            title: format!("Launch Success vs Failure ({site})"),
            counts: aggregate_by_outcome(filtered.iter().copied()),
        },
        scatter: ScatterView {
            title: format!("Payload vs. Launch Success ({site})"),
            records: filtered,
        },
    }
}

// ---------------------------------------------------------------------------
// Selection state + view controller
// ---------------------------------------------------------------------------

/// The user-controlled filter parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

/// Binds the two inputs (site, payload range) to the two chart outputs.
///
/// Holds no computed results: every [`ViewController::recompute`] filters the
/// dataset from scratch.
#[derive(Debug, Clone)]
pub struct ViewController {
    dataset: Arc<LaunchDataset>,
    selection: Selection,
}

impl ViewController {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            dataset,
            selection: Selection::default(),
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Dropdown changed. Unknown sites select all sites.
    pub fn select_site(&mut self, value: &str) {
        self.selection.site = SiteSelection::parse(value).resolve(&self.dataset);
    }

    /// Slider changed.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        self.selection.payload_range = range;
    }

    pub fn recompute(&self) -> DashboardView<'_> {
        dashboard_view(
            &self.dataset,
            &self.selection.site,
            self.selection.payload_range,
        )
    }
}
