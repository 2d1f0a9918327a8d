pub mod settings;

// Re-export commonly used types
pub use settings::{
    AppSettings, SimulationParams, TimestepMode, TimestepSettings, ViewerSettings,
    FIXED_TIMESTEP, config_path, load_settings, load_settings_from, save_settings,
    save_settings_to,
};
