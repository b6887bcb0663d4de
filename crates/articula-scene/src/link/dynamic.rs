//! Links simulated by the multibody dynamics solver.

use articula_core::error::LinkError;
use articula_core::ids::{ArticulationId, LinkId, SceneId};
use articula_physics::actor::ArticulatedActor;

use super::{Link, LinkBase};
use crate::render::RenderBody;

/// A link whose motion is computed by the articulated-body solver.
///
/// The actor is a member of the owning articulation's multibody. That is
/// established by the factory that builds the link and is not rechecked here.
#[derive(Debug)]
pub struct DynamicLink {
    base: LinkBase,
    actor: ArticulatedActor,
    articulation: ArticulationId,
}

impl DynamicLink {
    /// Create a dynamic link.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidArgument`] if `scene` is `None`.
    pub fn new(
        actor: ArticulatedActor,
        articulation: ArticulationId,
        id: LinkId,
        scene: Option<SceneId>,
        render_bodies: Vec<RenderBody>,
        collision_bodies: Vec<RenderBody>,
    ) -> Result<Self, LinkError> {
        let base = LinkBase::new(id, scene, render_bodies, collision_bodies)?;
        Ok(Self::from_base(actor, articulation, base))
    }

    /// Create a dynamic link around an already validated base.
    pub const fn from_base(
        actor: ArticulatedActor,
        articulation: ArticulationId,
        base: LinkBase,
    ) -> Self {
        Self {
            base,
            actor,
            articulation,
        }
    }
}

impl Link for DynamicLink {
    type Actor = ArticulatedActor;
    type Articulation = ArticulationId;

    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn actor_handle(&self) -> ArticulatedActor {
        self.actor
    }

    fn articulation(&self) -> ArticulationId {
        self.articulation
    }
}
