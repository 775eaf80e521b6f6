use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::LaunchRecord;

const ROW_HEIGHT: f32 = 18.0;

/// The launches currently behind the scatter chart, one row each.
pub fn records_table(ui: &mut Ui, records: &[&LaunchRecord]) {
    if records.is_empty() {
        ui.label("No launches match the current selection.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload Mass (kg)", "class", "Booster"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let rec = records[row.index()];
                row.col(|ui| {
                    ui.label(rec.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass));
                });
                row.col(|ui| {
                    ui.label(format!("{} ({})", rec.outcome.code(), rec.outcome.label()));
                });
                row.col(|ui| {
                    let booster = match (&rec.booster_version, &rec.booster_category) {
                        (Some(version), Some(category)) => format!("{version} [{category}]"),
                        (Some(version), None) => version.clone(),
                        (None, Some(category)) => category.clone(),
                        (None, None) => String::new(),
                    };
                    ui.label(booster);
                });
            });
        });
}
