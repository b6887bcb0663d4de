//! Shared test fixtures and utilities for articula crates.
//!
//! Provides reusable helpers for building Bevy test apps, spawning render
//! bodies and describing small articulations.

pub mod app;
pub mod fixtures;
pub mod spawn;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use app::scene_test_app;
pub use fixtures::{planar_chain, pendulum, slider_arm, zero_gravity_scene};
pub use spawn::spawn_render_bodies;
