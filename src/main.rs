use eframe::egui;
use text_analyzer::{
    gui::AnalyzerApp,
    settings::SettingsData,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = SettingsData::load();
    info!(format = %settings.default_output_format, "Starting text analyzer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Text Analyzer")
            .with_inner_size([640.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Text Analyzer",
        options,
        Box::new(move |cc| Ok(Box::new(AnalyzerApp::new(cc, settings)?))),
    )
}
