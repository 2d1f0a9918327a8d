use crate::utils::math::Transform;
use rapier3d::na::Unit;
use rapier3d::prelude::*;
use tracing::debug;

/// All rapier state for one simulation.
///
/// `PhysicsPipeline::step()` borrows every set mutably at once, so they live
/// together here.
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,

    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,

    integration_parameters: IntegrationParameters,
    gravity: Vector<Real>,
    steps: u64,
}

impl PhysicsWorld {
    /// Gravity points down the Y axis with the given magnitude.
    pub fn new(gravity: f32, dt: f32) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = dt;

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            integration_parameters,
            gravity: Vector::new(0.0, -gravity, 0.0),
            steps: 0,
        }
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    pub fn set_gravity(&mut self, magnitude: f32) {
        self.gravity = Vector::new(0.0, -magnitude, 0.0);
        // Resting bodies would otherwise ignore the new field until disturbed.
        for (_, body) in self.rigid_body_set.iter_mut() {
            if body.is_dynamic() {
                body.wake_up(true);
            }
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Inserts an immovable plane through `point`. `normal` points towards
    /// the free side; everything behind the plane is solid.
    pub fn add_fixed_plane(
        &mut self,
        point: Vector<Real>,
        normal: Vector<Real>,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().translation(point).build();
        let handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::halfspace(Unit::new_normalize(normal)).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Inserts a dynamic cube with the given half edge length and mass.
    pub fn add_dynamic_cuboid(
        &mut self,
        position: Vector<Real>,
        half_extent: Real,
        mass: Real,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic().translation(position).build();
        let handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::cuboid(half_extent, half_extent, half_extent)
            .mass(mass)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Applies `impulse` at the body's centre of mass, so no torque results.
    /// Returns `false` for unknown handles.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vector<Real>) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) => {
                body.apply_impulse(impulse, true);
                true
            }
            None => false,
        }
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vector<Real>> {
        self.rigid_body_set.get(handle).map(|body| *body.linvel())
    }

    pub fn transform(&self, handle: RigidBodyHandle) -> Option<Transform> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Transform::from_rapier(body.translation(), body.rotation()))
    }

    /// Advances the world by one timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps += 1;
        if self.steps % 600 == 0 {
            debug!(
                steps = self.steps,
                active = self.island_manager.active_dynamic_bodies().len(),
                "Physics progress"
            );
        }
    }
}
