use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};
use std::env;
use std::fs;
use std::io;

const LOG_FILE: &str = "cubefall.log";

fn default_filter(log_level: &str) -> EnvFilter {
    let mut filter = EnvFilter::new(log_level);
    for directive in [
        "cubefall=debug",
        "wgpu_core=warn",
        "wgpu_hal=warn",
        "naga=warn",
        "eframe=info",
        "egui_wgpu=info",
    ] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Console plus a per-session log file, and a panic hook that routes panics
/// through tracing. `RUST_LOG` replaces the default filter entirely.
pub fn init_logging() {
    let log_level = env::var("CUBEFALL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let enable_backtrace = env::var("RUST_BACKTRACE").map(|v| v == "1").unwrap_or(false);

    if let Err(e) = fs::remove_file(LOG_FILE) {
        if e.kind() != io::ErrorKind::NotFound {
            eprintln!("Warning: Failed to remove existing {}: {}", LOG_FILE, e);
        }
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&log_level));

    let console = fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true);

    let file = match fs::File::create(LOG_FILE) {
        Ok(log_file) => Some(
            fmt::layer()
                .with_writer(log_file)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed(),
        ),
        Err(e) => {
            eprintln!("Warning: File logging disabled, could not create {}: {}", LOG_FILE, e);
            None
        }
    };
    let file_enabled = file.is_some();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!("Panic occurred: {}", panic_info);

        if let Some(location) = panic_info.location() {
            tracing::error!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }

        if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            tracing::error!("Panic payload: {}", s);
        }

        if enable_backtrace {
            tracing::error!("Backtrace:\n{:?}", std::backtrace::Backtrace::capture());
        }
    }));

    tracing::info!("Logging initialized with level: {}", log_level);
    if file_enabled {
        tracing::info!("File logging enabled: {} (recreated each run)", LOG_FILE);
    }
}

pub fn log_system_info() {
    tracing::info!("=== System Information ===");
    tracing::info!("OS: {}", env::consts::OS);
    tracing::info!("Architecture: {}", env::consts::ARCH);
    tracing::info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if let Ok(backend) = env::var("WGPU_BACKEND") {
        tracing::info!("WGPU Backend: {}", backend);
    }
    tracing::info!("==========================");
}

pub fn log_adapter_info(adapter: &wgpu::Adapter) {
    let info = adapter.get_info();
    tracing::info!("=== WGPU Adapter Information ===");
    tracing::info!("Name: {}", info.name);
    tracing::info!("Backend: {:?}", info.backend);
    tracing::info!("Device Type: {:?}", info.device_type);
    tracing::info!("Driver: {} ({})", info.driver, info.driver_info);
    tracing::info!("================================");
}
