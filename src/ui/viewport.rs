use crate::world::SimEvent;
use eframe::egui;

/// Pointer input over the 3D area this frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewportInput {
    pub rect: egui::Rect,
    pub drag: egui::Vec2,
    pub scroll: f32,
}

/// Tracks the viewport size so resizes are reported once.
#[derive(Debug, Default)]
pub struct Viewport {
    last_size: Option<(u32, u32)>,
}

impl Viewport {
    /// Claims the rest of `ui` for the scene. A double-click becomes
    /// [`SimEvent::Throw`] and a size change becomes [`SimEvent::Resize`].
    pub fn show(&mut self, ui: &mut egui::Ui, events: &mut Vec<SimEvent>) -> ViewportInput {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        let pixels_per_point = ui.ctx().pixels_per_point();
        let size = (
            (rect.width() * pixels_per_point).round() as u32,
            (rect.height() * pixels_per_point).round() as u32,
        );
        if self.last_size != Some(size) {
            self.last_size = Some(size);
            events.push(SimEvent::Resize {
                width: size.0,
                height: size.1,
            });
        }

        if response.double_clicked() {
            events.push(SimEvent::Throw);
        }

        let drag = if response.dragged() {
            response.drag_delta()
        } else {
            egui::Vec2::ZERO
        };
        let scroll = if response.hovered() {
            ui.input(|i| i.smooth_scroll_delta.y)
        } else {
            0.0
        };

        ViewportInput { rect, drag, scroll }
    }
}
