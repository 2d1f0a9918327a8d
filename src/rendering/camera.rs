use cgmath::{InnerSpace, Matrix4, Point3, Vector3};
use std::f32::consts::FRAC_PI_2;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Looks at the origin from `(0, 5, 10)`.
    pub fn new(fovy: f32, aspect: f32) -> Self {
        Self {
            eye: (0.0, 5.0, 10.0).into(),
            target: (0.0, 0.0, 0.0).into(),
            up: Vector3::unit_y(),
            aspect,
            fovy,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(cgmath::Deg(self.fovy), self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// Zero-sized viewports (minimized windows) leave the aspect untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }
}

/// Orbits the camera around its target, easing input in over several frames.
#[derive(Debug, Clone)]
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitController {
    const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
    const MIN_DISTANCE: f32 = 1.0;
    const MAX_DISTANCE: f32 = 200.0;

    /// Starts from wherever `camera` currently sits relative to its target.
    pub fn new(camera: &Camera, damping: f32) -> Self {
        let offset = camera.eye - camera.target;
        let distance = offset.magnitude().max(Self::MIN_DISTANCE);
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            damping: damping.clamp(0.001, 1.0),
            rotate_speed: 0.005,
            zoom_speed: 0.002,
        }
    }

    /// Drag delta in points.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * self.rotate_speed;
        self.pending_pitch += dy * self.rotate_speed;
    }

    /// Positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_zoom -= scroll * self.zoom_speed;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_settled(&self) -> bool {
        self.pending_yaw.abs() < 1e-5
            && self.pending_pitch.abs() < 1e-5
            && self.pending_zoom.abs() < 1e-5
    }

    /// Applies a `damping` fraction of the pending motion and moves the eye.
    pub fn update_camera(&mut self, camera: &mut Camera) {
        self.yaw += self.pending_yaw * self.damping;
        self.pitch = (self.pitch + self.pending_pitch * self.damping)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.distance = (self.distance * (1.0 + self.pending_zoom * self.damping))
            .clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);

        let keep = 1.0 - self.damping;
        self.pending_yaw *= keep;
        self.pending_pitch *= keep;
        self.pending_zoom *= keep;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let offset =
            Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance;
        camera.eye = camera.target + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn controller_starts_at_camera_position() {
        let mut camera = Camera::new(75.0, 16.0 / 9.0);
        let start = camera.eye;
        let mut controller = OrbitController::new(&camera, 0.05);
        controller.update_camera(&mut camera);
        assert!((camera.eye - start).magnitude() < 1e-4);
    }

    #[test]
    fn damping_eases_rotation_in_fully() {
        let mut camera = Camera::new(75.0, 1.0);
        let mut controller = OrbitController::new(&camera, 0.05);
        let yaw = controller.yaw();
        controller.rotate(-200.0, 0.0);
        controller.update_camera(&mut camera);
        // Only a fraction lands on the first frame.
        assert!((controller.yaw() - (yaw + 0.05)).abs() < 1e-5);
        for _ in 0..500 {
            controller.update_camera(&mut camera);
        }
        assert!(controller.is_settled());
        assert!((controller.yaw() - (yaw + 1.0)).abs() < 1e-3);
    }

    #[test]
    fn pitch_and_distance_are_clamped() {
        let mut camera = Camera::new(75.0, 1.0);
        let mut controller = OrbitController::new(&camera, 1.0);
        controller.rotate(0.0, 10_000.0);
        controller.zoom(10_000.0);
        controller.update_camera(&mut camera);
        assert!(controller.pitch() < FRAC_PI_2);
        assert_eq!(controller.distance(), 1.0);
    }

    #[test]
    fn resize_ignores_empty_viewports() {
        let mut camera = Camera::new(75.0, 2.0);
        assert!(!camera.resize(0, 600));
        assert_eq!(camera.aspect, 2.0);
        assert!(camera.resize(800, 400));
        assert_eq!(camera.aspect, 2.0);
        assert!(camera.resize(400, 400));
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn view_projection_is_invertible() {
        let camera = Camera::new(75.0, 1.5);
        assert!(camera.build_view_projection_matrix().invert().is_some());
    }
}
