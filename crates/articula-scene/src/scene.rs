//! The scene: owner of the physics context, the articulations and,
//! through them, every link.

use std::collections::HashMap;

use bevy::prelude::{Resource, Transform};
use tracing::{debug, info, warn};

use articula_core::config::SceneConfig;
use articula_core::error::{ConfigError, SceneError};
use articula_core::ids::{ArticulationId, IdGenerator, KinematicArticulationId, LinkId, SceneId};
use articula_physics::actor::{Actor, ArticulatedActor, RigidActor};
use articula_physics::PhysicsContext;

use crate::articulation::Articulation;
use crate::builder::{ArticulationBuilder, LinkSpec};
use crate::kinematic_articulation::KinematicArticulation;
use crate::link::{DynamicLink, KinematicLink, Link, LinkBase, LinkRef};
use crate::topology;

/// Which articulation a link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkOwner {
    Dynamic(ArticulationId),
    Kinematic(KinematicArticulationId),
}

/// A physics scene.
///
/// Strong ownership runs scene -> articulation -> link. Links only hold ids
/// pointing back up, so tearing down an articulation destroys its links and
/// removes their bodies from the physics engine.
#[derive(Resource)]
pub struct Scene {
    id: SceneId,
    config: SceneConfig,
    physics: PhysicsContext,
    link_ids: IdGenerator,
    articulation_ids: IdGenerator,
    kinematic_ids: IdGenerator,
    articulations: HashMap<ArticulationId, Articulation>,
    kinematic_articulations: HashMap<KinematicArticulationId, KinematicArticulation>,
    link_owners: HashMap<LinkId, LinkOwner>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SceneConfig) -> Self {
        let id = SceneId::allocate();
        info!(scene = %id, substeps = config.substeps(), "created scene");
        Self {
            id,
            physics: PhysicsContext::from_config(&config),
            config,
            link_ids: IdGenerator::new(),
            articulation_ids: IdGenerator::new(),
            kinematic_ids: IdGenerator::new(),
            articulations: HashMap::new(),
            kinematic_articulations: HashMap::new(),
            link_owners: HashMap::new(),
        }
    }

    pub const fn id(&self) -> SceneId {
        self.id
    }

    pub const fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub const fn physics(&self) -> &PhysicsContext {
        &self.physics
    }

    pub const fn physics_mut(&mut self) -> &mut PhysicsContext {
        &mut self.physics
    }

    // -- Creation -------------------------------------------------------------

    /// Create a dynamics-coupled articulation from `builder`.
    pub fn create_articulation(
        &mut self,
        builder: &ArticulationBuilder,
    ) -> Result<ArticulationId, SceneError> {
        builder.validate()?;
        let joints = builder.joints();
        let specs = builder.links();
        let poses = topology::forward_kinematics(
            builder.initial_root_pose(),
            specs.len(),
            &joints,
            &[],
        );

        let actors: Vec<ArticulatedActor> = specs
            .iter()
            .zip(&poses)
            .enumerate()
            .map(|(index, (spec, pose))| {
                self.physics.insert_articulated_body(
                    *pose,
                    spec.mass,
                    index == 0 && builder.is_fixed_base(),
                )
            })
            .collect();

        for joint in &joints {
            let attached =
                self.physics
                    .attach_joint(actors[joint.parent], actors[joint.child], &joint.spec);
            if attached.is_none() {
                warn!(
                    articulation = builder.name(),
                    child = joint.child,
                    "physics engine rejected multibody joint"
                );
                for &actor in &actors {
                    self.physics.remove_body(actor);
                }
                return Err(SceneError::JointRejected(format!(
                    "link {} to parent {}",
                    joint.child, joint.parent
                )));
            }
        }

        let id = ArticulationId(self.articulation_ids.next_id());
        let mut links = Vec::with_capacity(specs.len());
        for (spec, actor) in specs.iter().zip(actors) {
            let base = self.new_link_base(spec)?;
            debug!(
                link = %base.id(),
                name = base.name(),
                articulation = %id,
                "created dynamic link"
            );
            self.link_owners.insert(base.id(), LinkOwner::Dynamic(id));
            links.push(DynamicLink::from_base(actor, id, base));
        }

        info!(
            articulation = %id,
            name = builder.name(),
            links = links.len(),
            dof = topology::dof(&joints),
            "created articulation"
        );
        let articulation = Articulation::new(
            id,
            self.id,
            builder.name().to_owned(),
            builder.is_fixed_base(),
            links,
            joints,
        );
        self.articulations.insert(id, articulation);
        Ok(id)
    }

    /// Create a kinematic articulation from `builder`. `fixed_base` is ignored:
    /// kinematic links only move when commanded.
    pub fn create_kinematic_articulation(
        &mut self,
        builder: &ArticulationBuilder,
    ) -> Result<KinematicArticulationId, SceneError> {
        builder.validate()?;
        let joints = builder.joints();
        let specs = builder.links();
        let root_pose = builder.initial_root_pose();
        let poses = topology::forward_kinematics(root_pose, specs.len(), &joints, &[]);

        let id = KinematicArticulationId(self.kinematic_ids.next_id());
        let mut links = Vec::with_capacity(specs.len());
        for (spec, pose) in specs.iter().zip(poses) {
            let base = self.new_link_base(spec)?;
            let actor: RigidActor = self.physics.insert_kinematic_body(pose);
            debug!(
                link = %base.id(),
                name = base.name(),
                articulation = %id,
                "created kinematic link"
            );
            self.link_owners.insert(base.id(), LinkOwner::Kinematic(id));
            links.push(KinematicLink::from_base(actor, id, base));
        }

        info!(
            articulation = %id,
            name = builder.name(),
            links = links.len(),
            "created kinematic articulation"
        );
        let articulation = KinematicArticulation::new(
            id,
            self.id,
            builder.name().to_owned(),
            links,
            joints,
            root_pose,
        );
        self.kinematic_articulations.insert(id, articulation);
        Ok(id)
    }

    fn new_link_base(&mut self, spec: &LinkSpec) -> Result<LinkBase, SceneError> {
        let id = LinkId(self.link_ids.next_id());
        let base = LinkBase::new(
            id,
            Some(self.id),
            spec.render_bodies.clone(),
            spec.collision_bodies.clone(),
        )?;
        Ok(base.with_name(spec.name.clone()))
    }

    // -- Lookup ---------------------------------------------------------------

    pub fn articulation(&self, id: ArticulationId) -> Option<&Articulation> {
        self.articulations.get(&id)
    }

    pub fn articulation_mut(&mut self, id: ArticulationId) -> Option<&mut Articulation> {
        self.articulations.get_mut(&id)
    }

    pub fn kinematic_articulation(
        &self,
        id: KinematicArticulationId,
    ) -> Option<&KinematicArticulation> {
        self.kinematic_articulations.get(&id)
    }

    pub fn kinematic_articulation_mut(
        &mut self,
        id: KinematicArticulationId,
    ) -> Option<&mut KinematicArticulation> {
        self.kinematic_articulations.get_mut(&id)
    }

    /// Sorted ids of the dynamic articulations.
    pub fn articulation_ids(&self) -> Vec<ArticulationId> {
        let mut ids: Vec<_> = self.articulations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Sorted ids of the kinematic articulations.
    pub fn kinematic_articulation_ids(&self) -> Vec<KinematicArticulationId> {
        let mut ids: Vec<_> = self.kinematic_articulations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Find a link of either kind by id.
    pub fn link(&self, id: LinkId) -> Option<LinkRef<'_>> {
        match *self.link_owners.get(&id)? {
            LinkOwner::Dynamic(owner) => self
                .articulations
                .get(&owner)?
                .link_by_id(id)
                .map(LinkRef::Dynamic),
            LinkOwner::Kinematic(owner) => self
                .kinematic_articulations
                .get(&owner)?
                .link_by_id(id)
                .map(LinkRef::Kinematic),
        }
    }

    /// Number of live links across all articulations.
    pub fn link_count(&self) -> usize {
        self.link_owners.len()
    }

    // -- Commands -------------------------------------------------------------

    /// Command joint positions of a kinematic articulation.
    pub fn set_kinematic_qpos(
        &mut self,
        id: KinematicArticulationId,
        qpos: &[f32],
    ) -> Result<(), SceneError> {
        let articulation = self
            .kinematic_articulations
            .get_mut(&id)
            .ok_or(SceneError::KinematicArticulationNotFound(id))?;
        articulation.set_qpos(&mut self.physics, qpos)
    }

    /// Command the root pose of a kinematic articulation.
    pub fn set_kinematic_root_pose(
        &mut self,
        id: KinematicArticulationId,
        pose: Transform,
    ) -> Result<(), SceneError> {
        let articulation = self
            .kinematic_articulations
            .get_mut(&id)
            .ok_or(SceneError::KinematicArticulationNotFound(id))?;
        articulation.set_root_pose(&mut self.physics, pose);
        Ok(())
    }

    /// Teleport a dynamic articulation so its root lands on `pose`.
    pub fn set_root_pose(&mut self, id: ArticulationId, pose: Transform) -> Result<(), SceneError> {
        let articulation = self
            .articulations
            .get(&id)
            .ok_or(SceneError::ArticulationNotFound(id))?;
        articulation.set_root_pose(&mut self.physics, pose);
        Ok(())
    }

    // -- Teardown -------------------------------------------------------------

    /// Destroy a dynamic articulation and its links.
    pub fn remove_articulation(&mut self, id: ArticulationId) -> Result<(), SceneError> {
        let articulation = self
            .articulations
            .remove(&id)
            .ok_or(SceneError::ArticulationNotFound(id))?;
        for link in articulation.links() {
            self.link_owners.remove(&link.id());
            self.physics.remove_body(link.actor_handle());
        }
        info!(articulation = %id, "removed articulation");
        Ok(())
    }

    /// Destroy a kinematic articulation and its links.
    pub fn remove_kinematic_articulation(
        &mut self,
        id: KinematicArticulationId,
    ) -> Result<(), SceneError> {
        let articulation = self
            .kinematic_articulations
            .remove(&id)
            .ok_or(SceneError::KinematicArticulationNotFound(id))?;
        for link in articulation.links() {
            self.link_owners.remove(&link.id());
            self.physics.remove_body(link.actor_handle());
        }
        info!(articulation = %id, "removed kinematic articulation");
        Ok(())
    }

    // -- Simulation -----------------------------------------------------------

    /// Advance the simulation by one control step (`substeps` physics steps).
    pub fn step(&mut self) {
        self.physics.step_all();
    }

    /// Whether `actor` resolves to a body in this scene.
    pub fn contains_actor(&self, actor: impl Actor) -> bool {
        self.physics.rigid_body_set.contains(actor.body())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_valid_config(SceneConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
