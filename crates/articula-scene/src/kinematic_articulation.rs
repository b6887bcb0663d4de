//! Kinematic articulation: links moved by forward kinematics from commanded
//! joint positions, with no joints in the physics engine.

use bevy::prelude::Transform;
use tracing::trace;

use articula_core::error::SceneError;
use articula_core::ids::{KinematicArticulationId, LinkId, SceneId};
use articula_physics::PhysicsContext;
use articula_physics::joint::JointKind;

use crate::link::{KinematicLink, Link};
use crate::topology::{self, ArticulationJoint};

/// A group of kinematic links driven by joint-position commands.
#[derive(Debug)]
pub struct KinematicArticulation {
    id: KinematicArticulationId,
    scene: SceneId,
    name: String,
    links: Vec<KinematicLink>,
    joints: Vec<ArticulationJoint>,
    root_pose: Transform,
    qpos: Vec<f32>,
}

impl KinematicArticulation {
    pub(crate) fn new(
        id: KinematicArticulationId,
        scene: SceneId,
        name: String,
        links: Vec<KinematicLink>,
        joints: Vec<ArticulationJoint>,
        root_pose: Transform,
    ) -> Self {
        let qpos = vec![0.0; topology::dof(&joints)];
        Self {
            id,
            scene,
            name,
            links,
            joints,
            root_pose,
            qpos,
        }
    }

    pub const fn id(&self) -> KinematicArticulationId {
        self.id
    }

    pub const fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn links(&self) -> &[KinematicLink] {
        &self.links
    }

    pub fn link(&self, index: usize) -> Option<&KinematicLink> {
        self.links.get(index)
    }

    pub fn link_index(&self, id: LinkId) -> Option<usize> {
        self.links.iter().position(|link| link.id() == id)
    }

    pub fn link_by_id(&self, id: LinkId) -> Option<&KinematicLink> {
        self.link_index(id).map(|index| &self.links[index])
    }

    pub fn link_by_name(&self, name: &str) -> Option<&KinematicLink> {
        self.links.iter().find(|link| link.name() == name)
    }

    pub fn root(&self) -> &KinematicLink {
        &self.links[0]
    }

    pub fn joints(&self) -> &[ArticulationJoint] {
        &self.joints
    }

    pub fn dof(&self) -> usize {
        self.qpos.len()
    }

    /// Last commanded joint positions (after clamping to limits).
    pub fn qpos(&self) -> &[f32] {
        &self.qpos
    }

    /// Last commanded root pose.
    pub const fn root_pose(&self) -> Transform {
        self.root_pose
    }

    /// Commanded world pose of every link.
    pub fn link_poses(&self) -> Vec<Transform> {
        topology::forward_kinematics(self.root_pose, self.links.len(), &self.joints, &self.qpos)
    }

    /// Command new joint positions. Links reach them on the next physics step.
    pub fn set_qpos(
        &mut self,
        physics: &mut PhysicsContext,
        qpos: &[f32],
    ) -> Result<(), SceneError> {
        if qpos.len() != self.dof() {
            return Err(SceneError::DofMismatch {
                expected: self.dof(),
                got: qpos.len(),
            });
        }
        let active = self.joints.iter().filter(|joint| joint.is_actuated());
        for ((slot, &value), joint) in self.qpos.iter_mut().zip(qpos).zip(active) {
            *slot = match joint.spec.limits {
                Some([lo, hi]) if joint.spec.kind != JointKind::Continuous => value.clamp(lo, hi),
                _ => value,
            };
        }
        self.drive(physics);
        Ok(())
    }

    /// Command a new root pose. Links reach it on the next physics step.
    pub fn set_root_pose(&mut self, physics: &mut PhysicsContext, pose: Transform) {
        self.root_pose = pose;
        self.drive(physics);
    }

    fn drive(&self, physics: &mut PhysicsContext) {
        for (link, pose) in self.links.iter().zip(self.link_poses()) {
            if !physics.set_kinematic_target(link.actor_handle(), pose) {
                trace!(link = %link.id(), "kinematic body missing, target dropped");
            }
        }
    }
}
