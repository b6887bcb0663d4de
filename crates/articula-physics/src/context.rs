//! All rapier pipeline state in one place.

use bevy::prelude::{Quat, Transform, Vec3};
use rapier3d::prelude::{
    CCDSolver, ColliderSet, DefaultBroadPhase, ImpulseJointSet, IntegrationParameters,
    IslandManager, MassProperties, MultibodyJointHandle, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};
use tracing::debug;

use articula_core::config::SceneConfig;

use crate::actor::{Actor, ArticulatedActor, RigidActor};
use crate::joint::JointSpec;

// ---------------------------------------------------------------------------
// BodyMass
// ---------------------------------------------------------------------------

/// Mass properties of a link body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMass {
    /// Mass in kilograms.
    pub mass: f32,
    /// Centre of mass in the body frame.
    pub com: Vec3,
    /// Principal inertia `[ixx, iyy, izz]`.
    pub inertia: Vec3,
}

impl Default for BodyMass {
    fn default() -> Self {
        Self {
            mass: 1.0,
            com: Vec3::ZERO,
            inertia: Vec3::splat(0.01),
        }
    }
}

// ---------------------------------------------------------------------------
// PhysicsContext
// ---------------------------------------------------------------------------

/// All rapier state for one scene.
///
/// `PhysicsPipeline::step()` requires mutable access to every set
/// simultaneously, so they must all live together.
pub struct PhysicsContext {
    // -- Rapier sets --
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,

    // -- Pipeline objects --
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub ccd_solver: CCDSolver,

    // -- Parameters --
    pub integration_parameters: IntegrationParameters,
    pub gravity: Vec3,
    /// Number of physics substeps per scene step.
    pub substeps: usize,
}

impl PhysicsContext {
    /// Create a new context with given gravity, timestep, and substep count.
    pub fn new(gravity: Vec3, dt: f32, substeps: usize) -> Self {
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
            gravity,
            substeps,
        }
    }

    /// Create a context from a scene configuration.
    pub fn from_config(config: &SceneConfig) -> Self {
        let gravity = Vec3::from_array(config.gravity);
        #[allow(clippy::cast_possible_truncation)]
        let dt = config.physics_dt as f32;
        Self::new(gravity, dt, config.substeps())
    }

    // -- Body creation --------------------------------------------------------

    /// Insert a body that will become a member of a multibody.
    pub fn insert_articulated_body(
        &mut self,
        pose: Transform,
        mass: BodyMass,
        fixed: bool,
    ) -> ArticulatedActor {
        let builder = if fixed {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let body = builder
            .translation(pose.translation)
            .rotation(pose.rotation.to_scaled_axis())
            .can_sleep(false)
            .additional_mass_properties(MassProperties::new(mass.com, mass.mass, mass.inertia))
            .build();
        let handle = self.rigid_body_set.insert(body);
        debug!(?handle, fixed, "inserted articulated body");
        ArticulatedActor::from_body(handle)
    }

    /// Insert a standalone kinematic (position-driven) body.
    pub fn insert_kinematic_body(&mut self, pose: Transform) -> RigidActor {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(pose.translation)
            .rotation(pose.rotation.to_scaled_axis())
            .build();
        let handle = self.rigid_body_set.insert(body);
        debug!(?handle, "inserted kinematic body");
        RigidActor::from_body(handle)
    }

    /// Connect two articulated bodies with a multibody joint.
    ///
    /// Returns `None` if rapier rejects the joint (e.g. it would close a loop).
    pub fn attach_joint(
        &mut self,
        parent: ArticulatedActor,
        child: ArticulatedActor,
        joint: &JointSpec,
    ) -> Option<MultibodyJointHandle> {
        self.multibody_joint_set
            .insert(parent.body(), child.body(), joint.to_generic_joint(), true)
    }

    /// Remove a body and every joint attached to it.
    pub fn remove_body(&mut self, actor: impl Actor) -> bool {
        self.rigid_body_set
            .remove(
                actor.body(),
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    /// Number of bodies currently in the engine.
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Whether `body` is a link of some multibody.
    pub fn is_articulated(&self, body: RigidBodyHandle) -> bool {
        self.multibody_joint_set.rigid_body_link(body).is_some()
    }

    // -- State queries --------------------------------------------------------

    fn body(&self, actor: impl Actor) -> Option<&RigidBody> {
        self.rigid_body_set.get(actor.body())
    }

    /// World pose of the actor's body.
    pub fn pose(&self, actor: impl Actor) -> Option<Transform> {
        let pose = self.body(actor)?.position();
        let t = pose.translation;
        let r = pose.rotation;
        Some(
            Transform::from_translation(Vec3::new(t.x, t.y, t.z))
                .with_rotation(Quat::from_xyzw(r.x, r.y, r.z, r.w)),
        )
    }

    /// World linear velocity of the actor's body.
    pub fn linear_velocity(&self, actor: impl Actor) -> Option<Vec3> {
        let v = self.body(actor)?.linvel();
        Some(Vec3::new(v.x, v.y, v.z))
    }

    /// World angular velocity of the actor's body.
    pub fn angular_velocity(&self, actor: impl Actor) -> Option<Vec3> {
        let w = self.body(actor)?.angvel();
        Some(Vec3::new(w.x, w.y, w.z))
    }

    /// World velocity of the material point of the actor's body currently at
    /// world position `point`.
    pub fn point_velocity(&self, actor: impl Actor, point: Vec3) -> Option<Vec3> {
        let body = self.body(actor)?;
        let v = body.linvel();
        let w = body.angvel();
        let c = body.center_of_mass();
        let lin = Vec3::new(v.x, v.y, v.z);
        let ang = Vec3::new(w.x, w.y, w.z);
        Some(lin + ang.cross(point - Vec3::new(c.x, c.y, c.z)))
    }

    /// Mass of the actor's body in kilograms.
    pub fn mass(&self, actor: impl Actor) -> Option<f32> {
        Some(self.body(actor)?.mass())
    }

    // -- Mutation -------------------------------------------------------------

    /// Teleport a body, zeroing nothing else.
    pub fn set_pose(&mut self, actor: impl Actor, pose: Transform) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(actor.body()) else {
            return false;
        };
        body.set_translation(pose.translation, true);
        body.set_rotation(pose.rotation, true);
        true
    }

    /// Add a world-frame force to a dynamic link's body until the next step.
    pub fn apply_force(&mut self, actor: ArticulatedActor, force: Vec3) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(actor.body()) else {
            return false;
        };
        body.add_force(force, true);
        true
    }

    /// Add a world-frame torque to a dynamic link's body until the next step.
    pub fn apply_torque(&mut self, actor: ArticulatedActor, torque: Vec3) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(actor.body()) else {
            return false;
        };
        body.add_torque(torque, true);
        true
    }

    /// Set the pose a kinematic body moves to during the next step.
    pub fn set_kinematic_target(&mut self, actor: RigidActor, pose: Transform) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(actor.body()) else {
            return false;
        };
        body.set_next_kinematic_translation(pose.translation);
        body.set_next_kinematic_rotation(pose.rotation);
        true
    }

    // -- Stepping -------------------------------------------------------------

    /// Run one physics substep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    /// Run `substeps` physics substeps.
    pub fn step_all(&mut self) {
        for _ in 0..self.substeps {
            self.step();
        }
    }
}

impl Default for PhysicsContext {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
