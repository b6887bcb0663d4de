// articula-scene: Links, articulations and the scene that owns them.
//
// Ownership runs one way: a `Scene` owns its articulations, each
// articulation owns its links, and links point back up through plain ids.
// A link is either a `DynamicLink` (member of a rapier multibody) or a
// `KinematicLink` (standalone kinematic body); both share `LinkBase`.

pub mod articulation;
pub mod builder;
pub mod kinematic_articulation;
pub mod link;
pub mod plugin;
pub mod render;
pub mod scene;
pub mod topology;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        articulation::Articulation,
        builder::{ArticulationBuilder, LinkSpec},
        kinematic_articulation::KinematicArticulation,
        link::{DynamicLink, KinematicLink, Link, LinkBase, LinkRef},
        plugin::{ArticulaScenePlugin, SceneSet},
        render::RenderBody,
        scene::Scene,
    };
    pub use articula_core::prelude::*;
    pub use articula_physics::prelude::*;
}

pub use plugin::ArticulaScenePlugin;
pub use scene::Scene;
