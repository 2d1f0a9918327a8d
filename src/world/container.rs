use crate::rendering::scene::{Material, Object, SceneGraph};
use crate::utils::math::{hex_to_linear_rgba, vector_to_rapier, Transform};
use crate::world::physics::PhysicsWorld;
use cgmath::{Deg, Quaternion, Rotation3, Vector3};
use rapier3d::prelude::RigidBodyHandle;
use tracing::info;

pub const PANEL_COLOR: u32 = 0x808080;
pub const PANEL_OPACITY: f32 = 0.5;
pub const PANEL_THICKNESS: f32 = 0.1;

/// One face of the enclosure.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub name: &'static str,
    pub point: Vector3<f32>,
    /// Points into the enclosure.
    pub normal: Vector3<f32>,
    /// Turns the flat `s × thickness × s` panel onto this face.
    pub panel_rotation: Quaternion<f32>,
}

/// The six faces bounding `x, z in [-s/2, s/2]`, `y in [0, s]`.
pub fn faces(container_size: f32) -> [Face; 6] {
    let s = container_size;
    let half = s / 2.0;
    let flat = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    let upright_z = Quaternion::from_angle_x(Deg(90.0));
    let upright_x = Quaternion::from_angle_z(Deg(90.0));

    [
        Face {
            name: "floor",
            point: Vector3::new(0.0, 0.0, 0.0),
            normal: Vector3::new(0.0, 1.0, 0.0),
            panel_rotation: flat,
        },
        Face {
            name: "ceiling",
            point: Vector3::new(0.0, s, 0.0),
            normal: Vector3::new(0.0, -1.0, 0.0),
            panel_rotation: flat,
        },
        Face {
            name: "front",
            point: Vector3::new(0.0, half, half),
            normal: Vector3::new(0.0, 0.0, -1.0),
            panel_rotation: upright_z,
        },
        Face {
            name: "back",
            point: Vector3::new(0.0, half, -half),
            normal: Vector3::new(0.0, 0.0, 1.0),
            panel_rotation: upright_z,
        },
        Face {
            name: "right",
            point: Vector3::new(half, half, 0.0),
            normal: Vector3::new(-1.0, 0.0, 0.0),
            panel_rotation: upright_x,
        },
        Face {
            name: "left",
            point: Vector3::new(-half, half, 0.0),
            normal: Vector3::new(1.0, 0.0, 0.0),
            panel_rotation: upright_x,
        },
    ]
}

/// Builds the static enclosure: one fixed plane and one translucent panel per
/// face. Returns the plane handles in face order.
pub fn build_container(
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    container_size: f32,
) -> Vec<RigidBodyHandle> {
    let color = hex_to_linear_rgba(PANEL_COLOR, PANEL_OPACITY);
    let scale = Vector3::new(container_size, PANEL_THICKNESS, container_size);

    let handles: Vec<RigidBodyHandle> = faces(container_size)
        .iter()
        .map(|face| {
            let handle = physics
                .add_fixed_plane(vector_to_rapier(face.point), vector_to_rapier(face.normal));
            scene.add_panel(Object::new(scale, color, Material::Translucent).with_transform(
                Transform {
                    position: face.point,
                    rotation: face.panel_rotation,
                },
            ));
            handle
        })
        .collect();

    info!(container_size, faces = handles.len(), "Container built");
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Rotation};

    #[test]
    fn faces_bound_the_cube() {
        let s = 10.0;
        // The cube's centre is on the free side of every plane.
        let centre = Vector3::new(0.0, s / 2.0, 0.0);
        for face in faces(s) {
            let offset = centre - face.point;
            assert!((offset.dot(face.normal) - s / 2.0).abs() < 1e-5, "{}", face.name);
        }
    }

    #[test]
    fn panels_lie_flat_against_their_face() {
        for face in faces(4.0) {
            // The panel's thin axis is local Y; it must end up along the normal.
            let thin_axis = face.panel_rotation.rotate_vector(Vector3::unit_y());
            assert!(thin_axis.dot(face.normal).abs() > 0.999, "{}", face.name);
        }
    }
}
