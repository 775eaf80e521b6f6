//! Request handlers. Each one maps query parameters to a selection and runs
//! the matching pure view function.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SharedState;
use crate::data::filter::{
    PayloadRange, SiteSelection, ALL_SITES, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP,
};
use crate::error::RangeError;
use crate::state::{dashboard_view, pie_view, scatter_view};

pub const DASHBOARD_HTML: &str = include_str!("../../templates/dashboard.html");

/// Label marks under the slider, every 5000 kg.
const SLIDER_MARK_STEP: f64 = 5_000.0;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Range(_) => StatusCode::BAD_REQUEST,
        };
        log::debug!("Rejected request: {self}");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// `?site=&low=&high=`; absent values mean "ALL" and the full slider.
#[derive(Debug, Deserialize, Default)]
pub struct ViewQuery {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl ViewQuery {
    fn site(&self, state: &SharedState) -> SiteSelection {
        SiteSelection::parse(self.site.as_deref().unwrap_or(ALL_SITES)).resolve(&state.dataset)
    }

    fn range(&self) -> Result<PayloadRange, RangeError> {
        PayloadRange::new(
            self.low.unwrap_or(SLIDER_MIN),
            self.high.unwrap_or(SLIDER_MAX),
        )
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    pub value: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub sites: Vec<SiteOption>,
    pub min_payload: f64,
    pub max_payload: f64,
    pub slider: SliderConfig,
    /// Outcome code → `#rrggbb`.
    pub colors: BTreeMap<u8, String>,
    pub record_count: usize,
}

/// Dropdown options, slider configuration and chart colours.
pub async fn api_options(State(state): State<SharedState>) -> Json<OptionsResponse> {
    let ds = &state.dataset;

    let sites = std::iter::once(SiteOption {
        label: SiteSelection::All.to_string(),
        value: ALL_SITES.to_string(),
    })
    .chain(ds.distinct_sites.iter().map(|site| SiteOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect();

    let mark_count = (SLIDER_MAX / SLIDER_MARK_STEP) as usize;
    let marks = (0..=mark_count)
        .map(|i| SLIDER_MIN + i as f64 * SLIDER_MARK_STEP)
        .collect();

    Json(OptionsResponse {
        sites,
        min_payload: ds.min_payload,
        max_payload: ds.max_payload,
        slider: SliderConfig {
            min: SLIDER_MIN,
            max: SLIDER_MAX,
            step: SLIDER_STEP,
            marks,
            value: [SLIDER_MIN, SLIDER_MAX],
        },
        colors: state.colors.css_map(),
        record_count: ds.len(),
    })
}

pub async fn api_pie(
    State(state): State<SharedState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let site = query.site(&state);
    let range = query.range()?;
    log::debug!("pie: site={site:?} range={range:?}");
    Ok(Json(pie_view(&state.dataset, &site, range)).into_response())
}

pub async fn api_scatter(
    State(state): State<SharedState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let site = query.site(&state);
    let range = query.range()?;
    log::debug!("scatter: site={site:?} range={range:?}");
    Ok(Json(scatter_view(&state.dataset, &site, range)).into_response())
}

/// Both charts from a single filter pass; what the page calls on every input change.
pub async fn api_view(
    State(state): State<SharedState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let site = query.site(&state);
    let range = query.range()?;
    log::debug!("view: site={site:?} range={range:?}");
    Ok(Json(dashboard_view(&state.dataset, &site, range)).into_response())
}
