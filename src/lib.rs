// cubefall: a box of falling cubes.
// rapier3d simulates, wgpu draws through eframe, egui edits the parameters.

pub mod app;
pub mod config;
pub mod error;
pub mod rendering;
pub mod ui;
pub mod utils;
pub mod world;

// Re-export commonly used types for convenience
pub use config::{AppSettings, SimulationParams, TimestepMode, TimestepSettings};
pub use error::{CubefallError, CubefallResult};
pub use world::{FrameStats, SimEvent, SimulationSession};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
