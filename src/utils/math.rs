use cgmath::{Quaternion, Vector3};
use rapier3d::prelude::{Real, Rotation, Vector};

/// Position and orientation shared by a physics body and its mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn from_rapier(translation: &Vector<Real>, rotation: &Rotation<Real>) -> Self {
        Self {
            position: vector_from_rapier(translation),
            rotation: quaternion_from_rapier(rotation),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

pub fn vector_from_rapier(v: &Vector<Real>) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn vector_to_rapier(v: Vector3<f32>) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

/// nalgebra stores `(i, j, k, w)`, cgmath takes `(w, x, y, z)`.
pub fn quaternion_from_rapier(q: &Rotation<Real>) -> Quaternion<f32> {
    Quaternion::new(q.w, q.i, q.j, q.k)
}

/// Converts an sRGB-encoded `0xRRGGBB` colour into linear RGBA.
pub fn hex_to_linear_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0), alpha]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
