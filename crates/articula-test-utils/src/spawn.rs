//! Entity spawn helpers for tests.

use bevy::prelude::*;

use articula_scene::render::RenderBody;

/// Spawn `n` empty entities and wrap them as render bodies.
///
/// Returns the handles in spawning order.
pub fn spawn_render_bodies(world: &mut World, n: usize) -> Vec<RenderBody> {
    (0..n).map(|_| RenderBody(world.spawn_empty().id())).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
