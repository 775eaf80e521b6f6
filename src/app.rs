use std::sync::Arc;

use eframe::egui;

use crate::color::OutcomeColors;
use crate::data::model::LaunchDataset;
use crate::state::ViewController;
use crate::ui::panels::{self, PayloadSliders};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub controller: ViewController,
    pub sliders: PayloadSliders,
    pub colors: OutcomeColors,
}

impl DashboardApp {
    pub fn new(dataset: Arc<LaunchDataset>) -> Self {
        Self {
            controller: ViewController::new(dataset),
            sliders: PayloadSliders::default(),
            colors: OutcomeColors::default(),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Left side panel: dropdown + payload range ----
        // Inputs first, so the charts below reflect this frame's selection.
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.controller, &mut self.sliders);
            });

        let view = self.controller.recompute();

        // ---- Top panel: title + summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, self.controller.dataset(), &view.pie.counts);
        });

        // ---- Bottom panel: filtered records ----
        egui::TopBottomPanel::bottom("records_panel")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                table::records_table(ui, &view.scatter.records);
            });

        // ---- Central panel: pie + scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                plot::pie_chart(&mut columns[0], &view.pie, &self.colors);
                plot::scatter_chart(&mut columns[1], &view.scatter, &self.colors);
            });
        });
    }
}
