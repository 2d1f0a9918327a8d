use crate::config::SimulationParams;
use crate::world::{FrameStats, SimEvent};
use eframe::egui;

/// The floating settings window.
///
/// Holds its own copy of the editable fields; the session only learns about
/// a change through the event pushed when a slider moves.
pub struct SettingsPanel {
    gravity: f32,
    throw_force: f32,
    pub status: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelResponse {
    pub save_requested: bool,
}

impl SettingsPanel {
    pub fn new(params: &SimulationParams) -> Self {
        Self {
            gravity: params.gravity,
            throw_force: params.throw_force,
            status: None,
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        params: &SimulationParams,
        stats: Option<FrameStats>,
        events: &mut Vec<SimEvent>,
    ) -> PanelResponse {
        let mut response = PanelResponse::default();

        egui::Window::new("Settings")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                let gravity =
                    egui::Slider::new(&mut self.gravity, SimulationParams::GRAVITY_RANGE)
                        .text("gravity");
                if ui.add(gravity).changed() {
                    events.push(SimEvent::SetGravity(self.gravity));
                }
                let throw_force =
                    egui::Slider::new(&mut self.throw_force, SimulationParams::THROW_FORCE_RANGE)
                        .text("throw force");
                if ui.add(throw_force).changed() {
                    events.push(SimEvent::SetThrowForce(self.throw_force));
                }

                ui.separator();
                ui.label(format!("Boxes: {}", params.boxes_number));
                ui.label(format!("Box size: {:.2}", params.box_size));
                ui.label(format!("Container size: {:.1}", params.container_size));
                if let Some(stats) = stats {
                    ui.label(format!("Frame {} ({} step(s))", stats.frame, stats.steps));
                }
                ui.small("Double-click the scene to throw the boxes.");

                ui.separator();
                if ui.button("Save").clicked() {
                    response.save_requested = true;
                }
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });

        response
    }
}
