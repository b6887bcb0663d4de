//! Dynamics-coupled articulation: a rapier multibody and the links built on it.

use bevy::prelude::{Transform, Vec3};

use articula_core::ids::{ArticulationId, LinkId, SceneId};
use articula_physics::PhysicsContext;

use crate::link::{DynamicLink, Link};
use crate::topology::{self, ArticulationJoint};

/// A multibody articulation. Owns its links; the scene owns the articulation.
#[derive(Debug)]
pub struct Articulation {
    id: ArticulationId,
    scene: SceneId,
    name: String,
    fixed_base: bool,
    links: Vec<DynamicLink>,
    joints: Vec<ArticulationJoint>,
}

impl Articulation {
    pub(crate) const fn new(
        id: ArticulationId,
        scene: SceneId,
        name: String,
        fixed_base: bool,
        links: Vec<DynamicLink>,
        joints: Vec<ArticulationJoint>,
    ) -> Self {
        Self {
            id,
            scene,
            name,
            fixed_base,
            links,
            joints,
        }
    }

    pub const fn id(&self) -> ArticulationId {
        self.id
    }

    pub const fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_fixed_base(&self) -> bool {
        self.fixed_base
    }

    /// Links in construction order; index 0 is the root.
    pub fn links(&self) -> &[DynamicLink] {
        &self.links
    }

    pub fn link(&self, index: usize) -> Option<&DynamicLink> {
        self.links.get(index)
    }

    pub fn link_index(&self, id: LinkId) -> Option<usize> {
        self.links.iter().position(|link| link.id() == id)
    }

    pub fn link_by_id(&self, id: LinkId) -> Option<&DynamicLink> {
        self.link_index(id).map(|index| &self.links[index])
    }

    pub fn link_by_name(&self, name: &str) -> Option<&DynamicLink> {
        self.links.iter().find(|link| link.name() == name)
    }

    /// The root link. Articulations are never empty.
    pub fn root(&self) -> &DynamicLink {
        &self.links[0]
    }

    pub fn joints(&self) -> &[ArticulationJoint] {
        &self.joints
    }

    /// Number of actuated joints.
    pub fn dof(&self) -> usize {
        topology::dof(&self.joints)
    }

    /// Joint positions read back from the current link poses.
    pub fn qpos(&self, physics: &PhysicsContext) -> Vec<f32> {
        self.active_joints()
            .map(|joint| {
                let parent = self.links[joint.parent].pose(physics);
                let child = self.links[joint.child].pose(physics);
                match (parent, child) {
                    (Some(p), Some(c)) => joint.spec.position_from_poses(&p, &c),
                    _ => 0.0,
                }
            })
            .collect()
    }

    /// Joint velocities read back from the current link velocities.
    pub fn qvel(&self, physics: &PhysicsContext) -> Vec<f32> {
        self.active_joints()
            .map(|joint| {
                let parent = &self.links[joint.parent];
                let child = &self.links[joint.child];
                let (Some(parent_pose), Some(child_pose)) =
                    (parent.pose(physics), child.pose(physics))
                else {
                    return 0.0;
                };
                let origin = child_pose.translation;
                joint.spec.velocity_from_bodies(
                    &parent_pose,
                    velocities_at(parent, physics, origin),
                    velocities_at(child, physics, origin),
                )
            })
            .collect()
    }

    pub fn root_pose(&self, physics: &PhysicsContext) -> Option<Transform> {
        self.root().pose(physics)
    }

    /// Teleport the whole articulation so its root lands on `pose`,
    /// preserving every link's pose relative to the root.
    pub fn set_root_pose(&self, physics: &mut PhysicsContext, pose: Transform) -> bool {
        let Some(current) = self.root_pose(physics) else {
            return false;
        };
        let delta = pose * rigid_inverse(&current);
        let mut moved = true;
        for link in &self.links {
            let Some(link_pose) = link.pose(physics) else {
                moved = false;
                continue;
            };
            moved &= physics.set_pose(link.actor_handle(), delta * link_pose);
        }
        moved
    }

    fn active_joints(&self) -> impl Iterator<Item = &ArticulationJoint> {
        self.joints.iter().filter(|joint| joint.is_actuated())
    }
}

/// Linear velocity of the body point at `point`, and angular velocity.
fn velocities_at(link: &DynamicLink, physics: &PhysicsContext, point: Vec3) -> (Vec3, Vec3) {
    (
        physics
            .point_velocity(link.actor_handle(), point)
            .unwrap_or(Vec3::ZERO),
        link.angular_velocity(physics).unwrap_or(Vec3::ZERO),
    )
}

/// Inverse of a scale-free transform.
fn rigid_inverse(t: &Transform) -> Transform {
    let rotation = t.rotation.inverse();
    Transform::from_translation(-(rotation * t.translation)).with_rotation(rotation)
}
