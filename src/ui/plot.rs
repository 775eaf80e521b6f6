use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::OutcomeColors;
use crate::data::model::Outcome;
use crate::state::{PieView, ScatterView};

/// Arc resolution of a full pie.
const PIE_SEGMENTS: usize = 128;

// ---------------------------------------------------------------------------
// Pie chart (success vs failure)
// ---------------------------------------------------------------------------

/// Outline of one pie slice: the centre followed by points along the arc.
/// Angles are in radians, measured counter-clockwise from the positive x axis.
pub fn slice_outline(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * PIE_SEGMENTS as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

/// Render the outcome counts as a pie drawn with plot polygons.
pub fn pie_chart(ui: &mut Ui, pie: &PieView, colors: &OutcomeColors) {
    ui.strong(&pie.title);

    let total = pie.counts.total();
    if total == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
        return;
    }

    Plot::new("success-pie-chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            // Start at 12 o'clock and go clockwise, like most pie charts.
            let mut angle = TAU / 4.0;
            for (outcome, count) in pie.counts.iter() {
                let share = count as f64 / total as f64;
                let end = angle - share * TAU;
                let color = colors.color_for(outcome);

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(slice_outline(end, angle)))
                        .name(format!("{} ({})", outcome.code(), outcome.label()))
                        .fill_color(color)
                        .stroke(Stroke::new(1.5, Color32::WHITE)),
                );

                let mid = (angle + end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", share * 100.0)).color(Color32::BLACK),
                ));

                angle = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart (payload vs outcome)
// ---------------------------------------------------------------------------

/// Render filtered launches as payload mass (x) against outcome code (y).
pub fn scatter_chart(ui: &mut Ui, scatter: &ScatterView<'_>, colors: &OutcomeColors) {
    ui.strong(&scatter.title);

    Plot::new("success-payload-scatter-chart")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Success (1=Success, 0=Failure)")
        .include_x(0.0)
        .include_y(-0.5)
        .include_y(1.5)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for outcome in Outcome::ALL {
                let points: PlotPoints = scatter
                    .records
                    .iter()
                    .filter(|rec| rec.outcome == outcome)
                    .map(|rec| [rec.payload_mass, outcome.code() as f64])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(outcome.code().to_string())
                        .color(colors.color_for(outcome))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}
