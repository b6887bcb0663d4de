// articula-physics: rapier3d state and opaque actor handles for articula.
//
// Links store actor handles and never touch rapier directly. All dynamic
// state (pose, velocity, forces) lives in the `PhysicsContext` and is fetched
// through a handle on every query.

pub mod actor;
pub mod context;
pub mod joint;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        actor::{Actor, ArticulatedActor, RigidActor},
        context::{BodyMass, PhysicsContext},
        joint::{JointKind, JointSpec},
    };
}

pub use context::PhysicsContext;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
