use cgmath::{Point3, Vector3};
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    // Packs into the vec3's trailing 4 bytes.
    pub ambient: f32,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub struct Light {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub ambient: f32,
    pub intensity: f32,
}

impl Light {
    /// White light above a container of the given size, off to one side so
    /// the box faces shade differently.
    pub fn above_container(container_size: f32) -> Self {
        Self {
            position: Point3::new(container_size * 0.4, container_size * 1.5, container_size * 0.8),
            color: Vector3::new(1.0, 1.0, 1.0),
            ambient: 0.25,
            intensity: 1.0,
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            position: self.position.into(),
            ambient: self.ambient,
            color: self.color.into(),
            intensity: self.intensity,
        }
    }
}
