//! Bevy test app builders.

use bevy::prelude::*;

use articula_core::config::SceneConfig;
use articula_scene::ArticulaScenePlugin;

/// Create a test app with the scene plugin and the given configuration.
pub fn scene_test_app(config: SceneConfig) -> App {
    let mut app = App::new();
    app.insert_resource(config);
    app.add_plugins(ArticulaScenePlugin);
    app.finish();
    app.cleanup();
    app
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use articula_scene::link::Link;
    use articula_scene::Scene;

    use crate::fixtures::pendulum;

    #[test]
    fn scene_app_builds() {
        let app = scene_test_app(SceneConfig::default());
        assert!(app.world().get_resource::<Scene>().is_some());
    }

    #[test]
    fn scene_app_update_advances_physics() {
        let mut app = scene_test_app(SceneConfig::default());
        let id = app
            .world_mut()
            .resource_mut::<Scene>()
            .create_articulation(&pendulum())
            .unwrap();
        let arm_pose = |app: &App| {
            let scene = app.world().resource::<Scene>();
            let arm = scene.articulation(id).unwrap().link(1).unwrap();
            arm.pose(scene.physics()).unwrap()
        };
        let before = arm_pose(&app);

        app.update();
        app.update();

        let after = arm_pose(&app);
        assert!(
            after.rotation.angle_between(before.rotation) > 1e-4,
            "arm did not move: before={before:?} after={after:?}"
        );
    }
}
