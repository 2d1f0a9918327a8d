use crate::rendering::camera::Camera;
use crate::rendering::camera_uniform::CameraUniform;
use crate::rendering::light::{Light, LightUniform};
use crate::rendering::mesh::InstanceRaw;
use crate::rendering::scene::{Material, SceneGraph};
use cgmath::{EuclideanSpace, InnerSpace};

/// Everything the GPU needs for one frame, extracted on the CPU so the paint
/// callback never touches the session.
#[derive(Debug, Clone, Default)]
pub struct FrameData {
    pub camera: CameraUniform,
    pub light: LightUniform,
    pub opaque: Vec<InstanceRaw>,
    /// Sorted back to front.
    pub translucent: Vec<InstanceRaw>,
}

impl FrameData {
    pub fn extract(scene: &SceneGraph, camera: &Camera, light: &Light) -> Self {
        let mut opaque = Vec::with_capacity(scene.boxes().len());
        let mut translucent = Vec::with_capacity(scene.panels().len());

        for object in scene.panels().iter().chain(scene.boxes()) {
            match object.material {
                Material::Lit => opaque.push(InstanceRaw::from_object(object)),
                Material::Translucent => {
                    let distance = (object.position - camera.eye.to_vec()).magnitude2();
                    translucent.push((distance, InstanceRaw::from_object(object)));
                }
            }
        }
        translucent.sort_by(|a, b| b.0.total_cmp(&a.0));

        Self {
            camera: CameraUniform::from_camera(camera),
            light: light.to_uniform(),
            opaque,
            translucent: translucent.into_iter().map(|(_, raw)| raw).collect(),
        }
    }

    pub fn instance_count(&self) -> usize {
        self.opaque.len() + self.translucent.len()
    }
}
