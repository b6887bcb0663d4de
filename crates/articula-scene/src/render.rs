//! Render and collision body handles.

use bevy::prelude::Entity;

/// Opaque handle to a render or collision-visualisation body.
///
/// The body itself lives in the renderer's world; a link only enumerates the
/// handles it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderBody(pub Entity);

impl RenderBody {
    /// The renderer entity behind this handle.
    pub const fn entity(self) -> Entity {
        self.0
    }
}

impl From<Entity> for RenderBody {
    fn from(entity: Entity) -> Self {
        Self(entity)
    }
}
