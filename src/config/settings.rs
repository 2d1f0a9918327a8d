use crate::error::{CubefallError, CubefallResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "CUBEFALL";

/// Physics step used by the synchronization loop, in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

// =============================================================================
// Simulation parameters
// =============================================================================

/// Parameters read by the world builder and the interaction handler.
///
/// `gravity` and `throw_force` are live-editable from the settings panel; the
/// rest only take effect when a session is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub boxes_number: usize,
    pub box_size: f32,
    pub container_size: f32,
    pub gravity: f32,
    pub throw_force: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            boxes_number: 50,
            box_size: 0.2,
            container_size: 10.0,
            gravity: 9.82,
            throw_force: 15.0,
        }
    }
}

impl SimulationParams {
    pub const GRAVITY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=20.0;
    pub const THROW_FORCE_RANGE: std::ops::RangeInclusive<f32> = 1.0..=30.0;
}

// =============================================================================
// Timestep
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimestepMode {
    /// One fixed step per frame, whatever the wall-clock frame time.
    #[default]
    Fixed,
    /// Accumulate wall-clock time and run as many fixed steps as fit.
    Accumulated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestepSettings {
    pub mode: TimestepMode,
    /// Upper bound on steps per frame in accumulated mode.
    pub max_substeps: u32,
}

impl Default for TimestepSettings {
    fn default() -> Self {
        Self {
            mode: TimestepMode::Fixed,
            max_substeps: 5,
        }
    }
}

// =============================================================================
// Viewer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub fovy_degrees: f32,
    pub orbit_damping: f32,
    pub vsync: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            fovy_degrees: 75.0,
            orbit_damping: 0.05,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub simulation: SimulationParams,
    pub timestep: TimestepSettings,
    pub viewer: ViewerSettings,
}

// =============================================================================
// Persistence
// =============================================================================

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "cubefall", "cubefall")
        .map(|proj| proj.config_dir().join(CONFIG_FILE))
}

/// Loads settings from the platform config file, then `CUBEFALL_*`
/// environment overrides (`CUBEFALL_SIMULATION__BOXES_NUMBER=200`).
pub fn load_settings() -> CubefallResult<AppSettings> {
    let path = config_path().ok_or(CubefallError::NoConfigDir)?;
    load_settings_from(&path)
}

/// A missing file is not an error: every field falls back to its default.
pub fn load_settings_from(path: &Path) -> CubefallResult<AppSettings> {
    debug!("Loading settings from {}", path.display());
    let layered = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(layered.try_deserialize()?)
}

pub fn save_settings(settings: &AppSettings) -> CubefallResult<PathBuf> {
    let path = config_path().ok_or(CubefallError::NoConfigDir)?;
    save_settings_to(settings, &path)?;
    Ok(path)
}

pub fn save_settings_to(settings: &AppSettings, path: &Path) -> CubefallResult<()> {
    let to_io_err = |source| CubefallError::ConfigSave {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_io_err)?;
    }
    let toml = toml::to_string_pretty(settings)?;
    fs::write(path, toml).map_err(to_io_err)?;
    info!("Settings saved to {}", path.display());
    Ok(())
}
