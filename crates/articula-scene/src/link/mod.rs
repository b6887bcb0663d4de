//! Link entities.
//!
//! A link is one rigid segment of an articulation. [`LinkBase`] carries the
//! identity, scene association and render/collision bodies both variants
//! share. [`DynamicLink`] and [`KinematicLink`] add an actor handle and an
//! articulation back-reference whose types differ per variant, so the two are
//! never interchangeable.

mod base;
mod dynamic;
mod kinematic;

use std::fmt::Debug;

use bevy::prelude::{Transform, Vec3};

use articula_core::ids::{LinkId, SceneId};
use articula_physics::actor::Actor;
use articula_physics::PhysicsContext;

use crate::render::RenderBody;

pub use base::LinkBase;
pub use dynamic::DynamicLink;
pub use kinematic::KinematicLink;

// ---------------------------------------------------------------------------
// Link
// ---------------------------------------------------------------------------

/// Read-only accessor contract shared by every link variant.
///
/// Nothing here is cached: physical state is fetched from the
/// [`PhysicsContext`] through the actor handle on every call.
pub trait Link {
    /// Physics handle type of this variant.
    type Actor: Actor;
    /// Back-reference type to the owning articulation.
    type Articulation: Copy + Eq + Debug;

    fn base(&self) -> &LinkBase;

    /// The actor handle given at construction.
    fn actor_handle(&self) -> Self::Actor;

    /// The owning articulation given at construction.
    fn articulation(&self) -> Self::Articulation;

    fn id(&self) -> LinkId {
        self.base().id()
    }

    fn scene(&self) -> SceneId {
        self.base().scene()
    }

    fn name(&self) -> &str {
        self.base().name()
    }

    fn render_bodies(&self) -> &[RenderBody] {
        self.base().render_bodies()
    }

    fn collision_bodies(&self) -> &[RenderBody] {
        self.base().collision_bodies()
    }

    fn pose(&self, physics: &PhysicsContext) -> Option<Transform> {
        physics.pose(self.actor_handle())
    }

    fn linear_velocity(&self, physics: &PhysicsContext) -> Option<Vec3> {
        physics.linear_velocity(self.actor_handle())
    }

    fn angular_velocity(&self, physics: &PhysicsContext) -> Option<Vec3> {
        physics.angular_velocity(self.actor_handle())
    }

    fn mass(&self, physics: &PhysicsContext) -> Option<f32> {
        physics.mass(self.actor_handle())
    }
}

// ---------------------------------------------------------------------------
// LinkRef
// ---------------------------------------------------------------------------

/// A link found by id, tagged with its variant.
#[derive(Debug, Clone, Copy)]
pub enum LinkRef<'a> {
    Dynamic(&'a DynamicLink),
    Kinematic(&'a KinematicLink),
}

impl<'a> LinkRef<'a> {
    pub fn base(self) -> &'a LinkBase {
        match self {
            Self::Dynamic(link) => link.base(),
            Self::Kinematic(link) => link.base(),
        }
    }

    pub fn id(self) -> LinkId {
        self.base().id()
    }

    pub fn pose(self, physics: &PhysicsContext) -> Option<Transform> {
        match self {
            Self::Dynamic(link) => link.pose(physics),
            Self::Kinematic(link) => link.pose(physics),
        }
    }

    pub const fn as_dynamic(self) -> Option<&'a DynamicLink> {
        match self {
            Self::Dynamic(link) => Some(link),
            Self::Kinematic(_) => None,
        }
    }

    pub const fn as_kinematic(self) -> Option<&'a KinematicLink> {
        match self {
            Self::Kinematic(link) => Some(link),
            Self::Dynamic(_) => None,
        }
    }
}
