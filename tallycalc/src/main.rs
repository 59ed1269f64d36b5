//! TallyCalc - A four-function calculator for the Tally Computer

mod app;
mod config;
mod display;
mod engine;
mod error;
mod number;

use app::TallyCalcApp;
use config::CalcConfig;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CalcConfig::load();
    tracing::info!(max_digits = config.max_digits, "starting tallycalc");

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([320.0, 480.0])
            .with_min_inner_size([240.0, 360.0])
            .with_title("calculator"),
        ..Default::default()
    };

    eframe::run_native(
        "calculator",
        options,
        Box::new(move |cc| {
            tallycore::TallyTheme::default()
                .with_font_path(config.font_path.clone())
                .apply(&cc.egui_ctx);
            Box::new(TallyCalcApp::new(cc, config))
        }),
    )
}
