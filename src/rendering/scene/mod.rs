pub mod graph;

pub use graph::SceneGraph;

use crate::utils::math::Transform;
use cgmath::{Matrix4, Quaternion, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Lit, opaque, depth-writing.
    Lit,
    /// Unlit, alpha-blended, drawn after everything opaque.
    Translucent,
}

/// A drawable instance of the unit cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
    pub color: [f32; 4],
    pub material: Material,
}

impl Object {
    pub fn new(scale: Vector3<f32>, color: [f32; 4], material: Material) -> Self {
        let Transform { position, rotation } = Transform::identity();
        Self {
            position,
            rotation,
            scale,
            color,
            material,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.set_transform(&transform);
        self
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
        }
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        self.position = transform.position;
        self.rotation = transform.rotation;
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}
