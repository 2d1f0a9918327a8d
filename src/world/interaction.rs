use crate::world::physics::PhysicsWorld;
use rand::Rng;
use rapier3d::prelude::{Real, RigidBodyHandle, Vector};
use tracing::info;

/// Each component uniform in `[-throw_force / 2, throw_force / 2)`.
pub fn random_impulse<R: Rng + ?Sized>(throw_force: f32, rng: &mut R) -> Vector<Real> {
    Vector::new(
        (rng.random::<f32>() - 0.5) * throw_force,
        (rng.random::<f32>() - 0.5) * throw_force,
        (rng.random::<f32>() - 0.5) * throw_force,
    )
}

/// Kicks every body in `bodies` with its own random impulse through the
/// centre of mass. Returns how many bodies were hit.
pub fn throw_boxes<R: Rng + ?Sized>(
    physics: &mut PhysicsWorld,
    bodies: &[RigidBodyHandle],
    throw_force: f32,
    rng: &mut R,
) -> usize {
    let thrown = bodies
        .iter()
        .filter(|&&handle| physics.apply_impulse(handle, random_impulse(throw_force, rng)))
        .count();
    info!(thrown, throw_force, "Boxes thrown");
    thrown
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn impulse_components_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let force = 15.0;
        for _ in 0..1000 {
            let impulse = random_impulse(force, &mut rng);
            for c in impulse.iter() {
                assert!(*c >= -force / 2.0 && *c < force / 2.0);
            }
        }
    }
}
