//! Bevy plugin that owns a [`Scene`] resource and steps it every frame.

use bevy::prelude::*;
use tracing::error;

use articula_core::config::SceneConfig;

use crate::scene::Scene;

/// System set the scene step runs in.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Simulate,
}

/// Inserts a [`Scene`] built from the app's [`SceneConfig`] resource (or the
/// default config) and registers [`scene_step_system`] in
/// [`SceneSet::Simulate`] on `Update`.
pub struct ArticulaScenePlugin;

impl Plugin for ArticulaScenePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SceneConfig>()
            .cloned()
            .unwrap_or_default();
        let scene = Scene::new(config).unwrap_or_else(|err| {
            error!(%err, "invalid scene config, using defaults");
            Scene::default()
        });
        app.insert_resource(scene);
        app.add_systems(Update, scene_step_system.in_set(SceneSet::Simulate));
    }
}

/// Advance the scene by one control step.
pub fn scene_step_system(mut scene: ResMut<Scene>) {
    scene.step();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
