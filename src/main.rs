use std::sync::Arc;

use anyhow::Context;
use eframe::egui;

use launch_dashboard::app::DashboardApp;
use launch_dashboard::args::{Arguments, Mode};
use launch_dashboard::data::loader::load_file;
use launch_dashboard::data::model::LaunchDataset;
use launch_dashboard::web;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::build();

    let dataset = load_file(&args.path)
        .map(Arc::new)
        .with_context(|| format!("loading {}", args.path.display()))?;

    match args.mode() {
        Mode::Serve => {
            // One event loop: requests are handled one after another.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("building tokio runtime")?;
            runtime.block_on(web::serve(dataset, args.serve.socket_addr()))
        }
        Mode::Desktop => run_desktop(dataset),
    }
}

fn run_desktop(dataset: Arc<LaunchDataset>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("native window: {e}"))
}
