use eframe::egui::{self, RichText, Ui};

use crate::data::aggregate::OutcomeCounts;
use crate::data::filter::{
    PayloadRange, SiteSelection, ALL_SITES, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP,
};
use crate::data::model::LaunchDataset;
use crate::state::ViewController;

// ---------------------------------------------------------------------------
// Payload range control
// ---------------------------------------------------------------------------

/// Two slider handles standing in for a dual-ended range slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadSliders {
    pub low: f64,
    pub high: f64,
}

impl Default for PayloadSliders {
    fn default() -> Self {
        Self {
            low: SLIDER_MIN,
            high: SLIDER_MAX,
        }
    }
}

impl PayloadSliders {
    /// Keep `low <= high` by dragging the other handle along.
    /// `low_moved` says which handle the user touched.
    pub fn clamp(&mut self, low_moved: bool) {
        if self.low > self.high {
            if low_moved {
                self.high = self.low;
            } else {
                self.low = self.high;
            }
        }
    }

    pub fn range(&self) -> Option<PayloadRange> {
        PayloadRange::new(self.low, self.high).ok()
    }

    /// Render both handles. Returns true when either moved.
    pub fn show(&mut self, ui: &mut Ui) -> bool {
        ui.label("Min");
        let low_changed = ui.add(payload_slider(&mut self.low)).changed();
        ui.label("Max");
        let high_changed = ui.add(payload_slider(&mut self.high)).changed();

        if low_changed || high_changed {
            self.clamp(low_changed);
        }
        low_changed || high_changed
    }
}

fn payload_slider(value: &mut f64) -> egui::Slider<'_> {
    egui::Slider::new(value, SLIDER_MIN..=SLIDER_MAX)
        .step_by(SLIDER_STEP)
        .suffix(" kg")
}

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload sliders, feeding changes to the controller.
pub fn side_panel(ui: &mut Ui, controller: &mut ViewController, sliders: &mut PayloadSliders) {
    ui.heading("Selection");
    ui.separator();

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let current = controller.selection().site.clone();
    let sites = controller.dataset().distinct_sites.clone();
    let mut picked: Option<String> = None;

    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, SiteSelection::All.to_string())
                .clicked()
            {
                picked = Some(ALL_SITES.to_string());
            }
            for site in &sites {
                let selected = current.value() == site.as_str();
                if ui.selectable_label(selected, site).clicked() {
                    picked = Some(site.clone());
                }
            }
        });

    if let Some(value) = picked {
        log::debug!("Site selected: {value}");
        controller.select_site(&value);
    }

    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg)");
    if sliders.show(ui) {
        match sliders.range() {
            Some(range) => controller.set_payload_range(range),
            None => log::warn!("Ignoring payload range {sliders:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and a one-line summary of the current selection.
pub fn top_bar(ui: &mut Ui, dataset: &LaunchDataset, counts: &OutcomeCounts) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new("SpaceX Launch Records Dashboard").strong());
        ui.separator();
        ui.label(format!(
            "{} of {} launches shown",
            counts.total(),
            dataset.len()
        ));
        if let Some(rate) = counts.success_rate() {
            ui.separator();
            ui.label(format!("success rate {:.1}%", rate * 100.0));
        }
        ui.separator();
        ui.label(format!(
            "payload in data: {}..={} kg",
            dataset.min_payload, dataset.max_payload
        ));
    });
}
