pub mod settings_panel;
pub mod viewport;

pub use settings_panel::{PanelResponse, SettingsPanel};
pub use viewport::{Viewport, ViewportInput};
