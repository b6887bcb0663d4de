//! Opaque actor handles.
//!
//! A link never owns the physics body that simulates it; it stores one of
//! these handles and hands it back to callers. The two handle types wrap the
//! same rapier [`RigidBodyHandle`] but are not convertible into each other, so
//! an articulated actor can never be driven as a kinematic one and vice versa.

use rapier3d::prelude::RigidBodyHandle;

/// Common capability of every actor handle: resolve to a rapier body.
pub trait Actor: Copy + Send + Sync + 'static {
    /// The rapier body this handle refers to.
    fn body(self) -> RigidBodyHandle;
}

// ---------------------------------------------------------------------------
// ArticulatedActor
// ---------------------------------------------------------------------------

/// Handle to a body that is a member of a multibody (dynamics-coupled) articulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticulatedActor(RigidBodyHandle);

impl ArticulatedActor {
    /// Wrap a rapier body. The caller guarantees the body belongs to a multibody.
    pub const fn from_body(handle: RigidBodyHandle) -> Self {
        Self(handle)
    }
}

impl Actor for ArticulatedActor {
    fn body(self) -> RigidBodyHandle {
        self.0
    }
}

// ---------------------------------------------------------------------------
// RigidActor
// ---------------------------------------------------------------------------

/// Handle to a standalone kinematic body that is never part of a multibody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidActor(RigidBodyHandle);

impl RigidActor {
    /// Wrap a rapier body. The caller guarantees the body is not jointed.
    pub const fn from_body(handle: RigidBodyHandle) -> Self {
        Self(handle)
    }
}

impl Actor for RigidActor {
    fn body(self) -> RigidBodyHandle {
        self.0
    }
}
