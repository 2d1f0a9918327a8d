use crate::config::{save_settings, AppSettings};
use crate::error::CubefallResult;
use crate::rendering::camera::{Camera, OrbitController};
use crate::rendering::engine::{paint_scene, RenderEngine};
use crate::rendering::frame::FrameData;
use crate::rendering::light::Light;
use crate::ui::{SettingsPanel, Viewport};
use crate::world::{FrameStats, SimEvent, SimulationSession};
use eframe::egui;
use std::time::Instant;
use tracing::{debug, error, info};

/// The demo: one session, the viewer looking at it, and the settings window.
pub struct CubefallApp {
    settings: AppSettings,
    session: SimulationSession,
    camera: Camera,
    orbit: OrbitController,
    light: Light,
    panel: SettingsPanel,
    viewport: Viewport,
    last_frame: Instant,
    last_stats: Option<FrameStats>,
}

impl CubefallApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> CubefallResult<Self> {
        RenderEngine::install(cc.wgpu_render_state.as_ref())?;
        Ok(Self::with_session(
            SimulationSession::new(settings.simulation.clone(), &settings.timestep),
            settings,
        ))
    }

    /// Everything but the GPU side, for callers that own their own session.
    pub fn with_session(session: SimulationSession, settings: AppSettings) -> Self {
        let camera = Camera::new(settings.viewer.fovy_degrees, 1.0);
        let orbit = OrbitController::new(&camera, settings.viewer.orbit_damping);
        let light = Light::above_container(session.params().container_size);
        let panel = SettingsPanel::new(session.params());

        Self {
            settings,
            session,
            camera,
            orbit,
            light,
            panel,
            viewport: Viewport::default(),
            last_frame: Instant::now(),
            last_stats: None,
        }
    }

    /// Viewer events go to the camera, everything else to the session.
    pub fn dispatch(&mut self, event: SimEvent) {
        if event.is_simulation() {
            self.session.apply(event);
        } else if let SimEvent::Resize { width, height } = event {
            if self.camera.resize(width, height) {
                debug!(width, height, aspect = self.camera.aspect, "Viewport resized");
            }
        }
    }

    fn save(&mut self) {
        self.settings.simulation = self.session.params().clone();
        self.panel.status = Some(match save_settings(&self.settings) {
            Ok(path) => format!("Saved to {}", path.display()),
            Err(e) => {
                error!("Failed to save settings: {}", e);
                format!("Save failed: {}", e)
            }
        });
    }
}

impl eframe::App for CubefallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        // Step and mirror before anything reads the scene this frame.
        self.last_stats = Some(self.session.step_frame(elapsed));

        let mut events = Vec::new();
        let panel_response = self
            .panel
            .show(ctx, self.session.params(), self.last_stats, &mut events);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::from_rgb(16, 16, 20)))
            .show(ctx, |ui| {
                let input = self.viewport.show(ui, &mut events);
                for event in events.drain(..) {
                    self.dispatch(event);
                }

                self.orbit.rotate(input.drag.x, input.drag.y);
                self.orbit.zoom(input.scroll);
                self.orbit.update_camera(&mut self.camera);

                let frame = FrameData::extract(self.session.scene(), &self.camera, &self.light);
                paint_scene(ui.painter(), input.rect, frame);
            });

        if panel_response.save_requested {
            info!("Saving settings");
            self.save();
        }

        ctx.request_repaint();
    }
}
