use crate::config::{SimulationParams, TimestepMode, TimestepSettings, FIXED_TIMESTEP};
use crate::rendering::scene::SceneGraph;
use crate::utils::math::{vector_from_rapier, Transform};
use crate::world::boxes::spawn_boxes;
use crate::world::container::build_container;
use crate::world::events::SimEvent;
use crate::world::interaction::throw_boxes;
use crate::world::physics::PhysicsWorld;
use cgmath::Vector3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rapier3d::prelude::RigidBodyHandle;
use std::time::Duration;
use tracing::{debug, info};

/// Decides how many physics steps a frame runs.
#[derive(Debug, Clone)]
pub struct Timestep {
    dt: f32,
    mode: TimestepMode,
    max_substeps: u32,
    accumulator: f32,
}

impl Timestep {
    pub fn new(settings: &TimestepSettings) -> Self {
        Self {
            dt: FIXED_TIMESTEP,
            mode: settings.mode,
            max_substeps: settings.max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn mode(&self) -> TimestepMode {
        self.mode
    }

    pub fn steps_for(&mut self, elapsed: Duration) -> u32 {
        match self.mode {
            TimestepMode::Fixed => 1,
            TimestepMode::Accumulated => {
                self.accumulator += elapsed.as_secs_f32();
                let due = (self.accumulator / self.dt).floor() as u32;
                let steps = due.min(self.max_substeps);
                self.accumulator -= steps as f32 * self.dt;
                if steps == self.max_substeps {
                    // Drop the backlog instead of spiralling after a stall.
                    self.accumulator = self.accumulator.min(self.dt);
                }
                steps
            }
        }
    }
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub steps: u32,
    pub synced: usize,
}

/// One running demo: the physics world, the scene mirroring it, and the
/// parameters both were built from.
///
/// `bodies[i]` drives `scene.boxes()[i]` for the whole session; nothing is
/// reordered or removed.
pub struct SimulationSession {
    params: SimulationParams,
    physics: PhysicsWorld,
    scene: SceneGraph,
    bodies: Vec<RigidBodyHandle>,
    static_bodies: Vec<RigidBodyHandle>,
    timestep: Timestep,
    rng: StdRng,
    frame: u64,
}

impl SimulationSession {
    pub fn new(params: SimulationParams, timestep: &TimestepSettings) -> Self {
        Self::with_rng(params, timestep, StdRng::from_os_rng())
    }

    pub fn with_seed(params: SimulationParams, timestep: &TimestepSettings, seed: u64) -> Self {
        Self::with_rng(params, timestep, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        params: SimulationParams,
        timestep: &TimestepSettings,
        mut rng: StdRng,
    ) -> Self {
        let timestep = Timestep::new(timestep);
        let mut physics = PhysicsWorld::new(params.gravity, timestep.dt());
        let mut scene = SceneGraph::new();

        let static_bodies = build_container(&mut physics, &mut scene, params.container_size);
        let bodies = spawn_boxes(&mut physics, &mut scene, &params, &mut rng);

        info!(
            boxes = bodies.len(),
            container_size = params.container_size,
            gravity = params.gravity,
            mode = ?timestep.mode(),
            "Simulation session ready"
        );

        Self {
            params,
            physics,
            scene,
            bodies,
            static_bodies,
            timestep,
            rng,
            frame: 0,
        }
    }

    /// One iteration of the synchronization loop: step the world, then copy
    /// every body's transform onto its mesh. Rendering is up to the caller.
    pub fn step_frame(&mut self, elapsed: Duration) -> FrameStats {
        let steps = self.timestep.steps_for(elapsed);
        for _ in 0..steps {
            self.physics.step();
        }
        let synced = self.sync_meshes();
        self.frame += 1;

        if self.frame % 300 == 0 {
            debug!(frame = self.frame, steps, synced, "Frame");
        }
        FrameStats {
            frame: self.frame,
            steps,
            synced,
        }
    }

    fn sync_meshes(&mut self) -> usize {
        let mut synced = 0;
        for (index, &handle) in self.bodies.iter().enumerate() {
            if let (Some(transform), Some(mesh)) =
                (self.physics.transform(handle), self.scene.box_mut(index))
            {
                mesh.set_transform(&transform);
                synced += 1;
            }
        }
        synced
    }

    pub fn throw_boxes(&mut self) -> usize {
        throw_boxes(
            &mut self.physics,
            &self.bodies,
            self.params.throw_force,
            &mut self.rng,
        )
    }

    pub fn set_gravity(&mut self, value: f32) {
        self.params.gravity = value;
        self.physics.set_gravity(value);
        info!(gravity = value, "Gravity changed");
    }

    pub fn set_throw_force(&mut self, value: f32) {
        self.params.throw_force = value;
        info!(throw_force = value, "Throw force changed");
    }

    /// Returns `false` for events that are not the simulation's concern.
    pub fn apply(&mut self, event: SimEvent) -> bool {
        match event {
            SimEvent::Throw => {
                self.throw_boxes();
            }
            SimEvent::SetGravity(value) => self.set_gravity(value),
            SimEvent::SetThrowForce(value) => self.set_throw_force(value),
            SimEvent::Resize { .. } => return false,
        }
        true
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.scene.boxes().len()
    }

    pub fn body_transform(&self, index: usize) -> Option<Transform> {
        self.bodies
            .get(index)
            .and_then(|&handle| self.physics.transform(handle))
    }

    pub fn mesh_transform(&self, index: usize) -> Option<Transform> {
        self.scene.boxes().get(index).map(|mesh| mesh.transform())
    }

    pub fn body_velocity(&self, index: usize) -> Option<Vector3<f32>> {
        self.bodies
            .get(index)
            .and_then(|&handle| self.physics.linvel(handle))
            .map(|v| vector_from_rapier(&v))
    }

    pub fn static_body_transforms(&self) -> Vec<Transform> {
        self.static_bodies
            .iter()
            .filter_map(|&handle| self.physics.transform(handle))
            .collect()
    }

    pub fn static_body_velocities(&self) -> Vec<Vector3<f32>> {
        self.static_bodies
            .iter()
            .filter_map(|&handle| self.physics.linvel(handle))
            .map(|v| vector_from_rapier(&v))
            .collect()
    }

    pub fn gravity(&self) -> Vector3<f32> {
        vector_from_rapier(&self.physics.gravity())
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulated(max_substeps: u32) -> Timestep {
        Timestep::new(&TimestepSettings {
            mode: TimestepMode::Accumulated,
            max_substeps,
        })
    }

    #[test]
    fn fixed_mode_ignores_wall_time() {
        let mut timestep = Timestep::new(&TimestepSettings::default());
        assert_eq!(timestep.steps_for(Duration::ZERO), 1);
        assert_eq!(timestep.steps_for(Duration::from_millis(100)), 1);
        assert_eq!(timestep.steps_for(Duration::from_millis(4)), 1);
    }

    #[test]
    fn accumulated_mode_carries_remainder() {
        let mut timestep = accumulated(5);
        // 40ms holds two 16.7ms steps with 6.7ms left over.
        assert_eq!(timestep.steps_for(Duration::from_millis(40)), 2);
        // 6.7 + 5 is still short of a step.
        assert_eq!(timestep.steps_for(Duration::from_millis(5)), 0);
        // 11.7 + 10 crosses one step.
        assert_eq!(timestep.steps_for(Duration::from_millis(10)), 1);
    }

    #[test]
    fn accumulated_mode_caps_substeps_and_drops_backlog() {
        let mut timestep = accumulated(3);
        assert_eq!(timestep.steps_for(Duration::from_secs(1)), 3);
        // The backlog from the 1s stall is gone: a short frame runs at most one step.
        assert!(timestep.steps_for(Duration::from_millis(1)) <= 1);
    }
}
