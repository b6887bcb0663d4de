//! Identity, scene association and render/collision bodies shared by every link.

use articula_core::error::LinkError;
use articula_core::ids::{LinkId, SceneId};

use crate::render::RenderBody;

/// Shared part of [`DynamicLink`](super::DynamicLink) and
/// [`KinematicLink`](super::KinematicLink).
///
/// Every field is fixed at construction; there are no setters.
#[derive(Debug, PartialEq, Eq)]
pub struct LinkBase {
    id: LinkId,
    scene: SceneId,
    name: String,
    render_bodies: Vec<RenderBody>,
    collision_bodies: Vec<RenderBody>,
}

impl LinkBase {
    /// Create a link base.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidArgument`] if `scene` is `None`.
    pub fn new(
        id: LinkId,
        scene: Option<SceneId>,
        render_bodies: Vec<RenderBody>,
        collision_bodies: Vec<RenderBody>,
    ) -> Result<Self, LinkError> {
        let scene = scene.ok_or(LinkError::InvalidArgument("link scene must not be null"))?;
        Ok(Self {
            id,
            scene,
            name: String::new(),
            render_bodies,
            collision_bodies,
        })
    }

    /// Attach a human-readable name. Only usable while constructing.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub const fn id(&self) -> LinkId {
        self.id
    }

    pub const fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render bodies in insertion order.
    pub fn render_bodies(&self) -> &[RenderBody] {
        &self.render_bodies
    }

    /// Collision-visualisation bodies in insertion order.
    pub fn collision_bodies(&self) -> &[RenderBody] {
        &self.collision_bodies
    }
}
