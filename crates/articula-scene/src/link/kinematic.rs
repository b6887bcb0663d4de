//! Links whose pose is commanded from outside the dynamics solver.

use articula_core::error::LinkError;
use articula_core::ids::{KinematicArticulationId, LinkId, SceneId};
use articula_physics::actor::RigidActor;

use super::{Link, LinkBase};
use crate::render::RenderBody;

/// A link driven by pose commands through a standalone kinematic body.
///
/// The actor is never part of a multibody, and the back-reference points at
/// a [`KinematicArticulation`](crate::kinematic_articulation::KinematicArticulation),
/// not a dynamics-coupled one.
#[derive(Debug)]
pub struct KinematicLink {
    base: LinkBase,
    actor: RigidActor,
    articulation: KinematicArticulationId,
}

impl KinematicLink {
    /// Create a kinematic link.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidArgument`] if `scene` is `None`.
    pub fn new(
        actor: RigidActor,
        articulation: KinematicArticulationId,
        id: LinkId,
        scene: Option<SceneId>,
        render_bodies: Vec<RenderBody>,
        collision_bodies: Vec<RenderBody>,
    ) -> Result<Self, LinkError> {
        let base = LinkBase::new(id, scene, render_bodies, collision_bodies)?;
        Ok(Self::from_base(actor, articulation, base))
    }

    pub const fn from_base(
        actor: RigidActor,
        articulation: KinematicArticulationId,
        base: LinkBase,
    ) -> Self {
        Self {
            base,
            actor,
            articulation,
        }
    }
}

impl Link for KinematicLink {
    type Actor = RigidActor;
    type Articulation = KinematicArticulationId;

    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn actor_handle(&self) -> RigidActor {
        self.actor
    }

    fn articulation(&self) -> KinematicArticulationId {
        self.articulation
    }
}
