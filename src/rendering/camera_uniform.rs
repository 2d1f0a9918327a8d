use crate::rendering::camera::Camera;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    // w unused; vec3 uniforms would need the same padding anyway.
    pub view_pos: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.build_view_projection_matrix().into(),
            view_pos: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
        }
    }
}
