// articula-core: Identifiers, errors and configuration for articulated bodies.

pub mod config;
pub mod error;
pub mod ids;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        config::SceneConfig,
        error::{ArticulaError, ConfigError, LinkError, SceneError},
        ids::{ArticulationId, IdGenerator, KinematicArticulationId, LinkId, SceneId},
    };
}
