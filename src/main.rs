use cubefall::app::CubefallApp;
use cubefall::config::{load_settings, AppSettings};
use cubefall::rendering::engine::DEPTH_BITS;
use cubefall::utils::logging::{init_logging, log_system_info};
use eframe::egui;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging();
    log_system_info();

    let settings = load_settings().unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        AppSettings::default()
    });
    info!(?settings, "Starting {} {}", cubefall::APP_NAME, cubefall::VERSION);

    let options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        depth_buffer: DEPTH_BITS,
        vsync: settings.viewer.vsync,
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("cubefall {}", cubefall::VERSION))
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "cubefall",
        options,
        Box::new(move |cc| Ok(Box::new(CubefallApp::new(cc, settings)?))),
    )
    .map_err(|e| anyhow::anyhow!("Event loop exited with error: {}", e))
}
