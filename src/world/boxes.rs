use crate::config::SimulationParams;
use crate::rendering::scene::{Material, Object, SceneGraph};
use crate::utils::math::{hex_to_linear_rgba, vector_to_rapier, Transform};
use crate::world::physics::PhysicsWorld;
use cgmath::Vector3;
use rand::Rng;
use rapier3d::prelude::RigidBodyHandle;
use tracing::info;

pub const BOX_MASS: f32 = 1.0;

/// Uniform position inside the container's upper half, clear of the walls
/// and the ceiling by one box edge.
pub fn random_box_position<R: Rng + ?Sized>(
    params: &SimulationParams,
    rng: &mut R,
) -> Vector3<f32> {
    let s = params.container_size;
    let free_span = s - params.box_size;
    Vector3::new(
        (rng.random::<f32>() - 0.5) * free_span,
        s / 2.0 + rng.random::<f32>() * (s / 2.0 - params.box_size),
        (rng.random::<f32>() - 0.5) * free_span,
    )
}

/// One colour per session, shared by every box.
pub fn random_box_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    hex_to_linear_rgba(rng.random_range(0..=0xffffff), 1.0)
}

/// Creates `boxes_number` dynamic bodies and their meshes. Returned handles
/// are in mesh order: handle `i` drives `scene.boxes()[i]`.
pub fn spawn_boxes<R: Rng + ?Sized>(
    physics: &mut PhysicsWorld,
    scene: &mut SceneGraph,
    params: &SimulationParams,
    rng: &mut R,
) -> Vec<RigidBodyHandle> {
    let color = random_box_color(rng);
    let scale = Vector3::new(params.box_size, params.box_size, params.box_size);
    let half_extent = params.box_size / 2.0;

    let mut handles = Vec::with_capacity(params.boxes_number);
    for _ in 0..params.boxes_number {
        let position = random_box_position(params, rng);
        let handle = physics.add_dynamic_cuboid(vector_to_rapier(position), half_extent, BOX_MASS);
        let index = scene.add_box(Object::new(scale, color, Material::Lit).with_transform(
            Transform {
                position,
                ..Transform::identity()
            },
        ));
        debug_assert_eq!(index, handles.len());
        handles.push(handle);
    }

    info!(count = handles.len(), box_size = params.box_size, "Boxes spawned");
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn positions_stay_inside_the_upper_half() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        let half = params.container_size / 2.0;
        for _ in 0..1000 {
            let p = random_box_position(&params, &mut rng);
            assert!(p.x.abs() <= half - params.box_size / 2.0);
            assert!(p.z.abs() <= half - params.box_size / 2.0);
            assert!(p.y >= half);
            assert!(p.y <= params.container_size - params.box_size);
        }
    }
}
