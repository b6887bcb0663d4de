//! Opaque numeric identifiers.
//!
//! Every identifier is a distinct newtype over `u32` so that, for example, a
//! dynamic link's [`ArticulationId`] can never be passed where a
//! [`KinematicArticulationId`] is expected.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw numeric value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a single link, unique within its scene.
    LinkId
);
numeric_id!(
    /// Identifier of a scene, unique within the process.
    SceneId
);
numeric_id!(
    /// Identifier of a dynamics-coupled articulation.
    ArticulationId
);
numeric_id!(
    /// Identifier of a kinematic (externally driven) articulation.
    KinematicArticulationId
);

// ---------------------------------------------------------------------------
// IdGenerator
// ---------------------------------------------------------------------------

/// Monotonic id source. Ids start at 1 and are never handed out twice.
#[derive(Debug)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Return the next id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub const fn issued(&self) -> u32 {
        self.next - 1
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

impl SceneId {
    /// Allocate a process-wide unique scene id.
    pub fn allocate() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}
