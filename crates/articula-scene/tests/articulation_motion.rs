//! Motion of dynamic and kinematic articulations inside a scene.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use articula_core::config::SceneConfig;
use articula_core::error::SceneError;
use articula_physics::joint::JointSpec;
use articula_scene::builder::{ArticulationBuilder, LinkSpec};
use articula_scene::link::Link;
use articula_scene::Scene;
use articula_test_utils::{pendulum, planar_chain, scene_test_app, slider_arm, zero_gravity_scene};

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}

#[test]
fn kinematic_chain_follows_commanded_qpos() {
    let mut scene = zero_gravity_scene();
    let id = scene.create_kinematic_articulation(&planar_chain(3)).unwrap();

    scene.set_kinematic_qpos(id, &[FRAC_PI_2, 0.0]).unwrap();
    scene.step();

    let articulation = scene.kinematic_articulation(id).unwrap();
    let tip = articulation.link(2).unwrap().pose(scene.physics()).unwrap();
    assert!(
        close(tip.translation, Vec3::new(0.5, 0.5, 0.0)),
        "tip at {:?}",
        tip.translation
    );
    assert_eq!(articulation.qpos(), &[FRAC_PI_2, 0.0]);
}

#[test]
fn kinematic_qpos_length_checked() {
    let mut scene = zero_gravity_scene();
    let id = scene.create_kinematic_articulation(&planar_chain(3)).unwrap();

    let err = scene.set_kinematic_qpos(id, &[0.1]).unwrap_err();
    assert!(matches!(err, SceneError::DofMismatch { expected: 2, got: 1 }));
}

#[test]
fn kinematic_qpos_clamped_to_limits() {
    let mut scene = zero_gravity_scene();
    let id = scene.create_kinematic_articulation(&slider_arm()).unwrap();

    scene.set_kinematic_qpos(id, &[2.0, -3.0]).unwrap();
    let articulation = scene.kinematic_articulation(id).unwrap();
    assert_eq!(articulation.qpos(), &[0.5, -1.0]);
}

#[test]
fn kinematic_root_pose_moves_every_link() {
    let mut scene = zero_gravity_scene();
    let id = scene.create_kinematic_articulation(&planar_chain(2)).unwrap();
    let offset = Vec3::new(0.0, 2.0, 1.0);

    scene
        .set_kinematic_root_pose(id, Transform::from_translation(offset))
        .unwrap();
    scene.step();

    let articulation = scene.kinematic_articulation(id).unwrap();
    let root = articulation.root().pose(scene.physics()).unwrap();
    let child = articulation.link(1).unwrap().pose(scene.physics()).unwrap();
    assert!(close(root.translation, offset));
    assert!(close(child.translation, offset + Vec3::new(0.5, 0.0, 0.0)));
}

#[test]
fn pendulum_swings_under_gravity() {
    let mut scene = Scene::default();
    let id = scene.create_articulation(&pendulum()).unwrap();

    for _ in 0..30 {
        scene.step();
    }

    let articulation = scene.articulation(id).unwrap();
    let q = articulation.qpos(scene.physics());
    assert_eq!(q.len(), 1);
    assert!(q[0].abs() > 0.01, "pendulum did not move: {q:?}");
}

fn teleport_and_settle(fixed_base: bool) -> (Vec3, Vec3) {
    let mut scene = zero_gravity_scene();
    let id = scene.create_articulation(&planar_chain(2).fixed_base(fixed_base)).unwrap();

    scene.set_root_pose(id, Transform::from_xyz(1.0, 0.0, 0.5)).unwrap();
    for _ in 0..5 {
        scene.step();
    }

    let articulation = scene.articulation(id).unwrap();
    let root = articulation.root_pose(scene.physics()).unwrap();
    let child = articulation.link(1).unwrap().pose(scene.physics()).unwrap();
    (root.translation, child.translation)
}

#[test]
fn fixed_base_root_pose_survives_stepping() {
    let (root, child) = teleport_and_settle(true);
    assert!(close(root, Vec3::new(1.0, 0.0, 0.5)), "root at {root:?}");
    assert!(close(child, Vec3::new(1.5, 0.0, 0.5)), "child at {child:?}");
}

#[test]
fn floating_base_root_pose_survives_stepping() {
    let (root, child) = teleport_and_settle(false);
    assert!(close(root, Vec3::new(1.0, 0.0, 0.5)), "root at {root:?}");
    assert!(close(child, Vec3::new(1.5, 0.0, 0.5)), "child at {child:?}");
}

#[test]
fn inverted_limits_fail_creation_instead_of_commands() {
    let mut scene = zero_gravity_scene();
    let mut builder = ArticulationBuilder::new("bad");
    let root = builder.add_link(LinkSpec::root("base"));
    builder.add_link(LinkSpec::child(
        "arm",
        root,
        JointSpec::revolute(Vec3::Z, Vec3::X).with_limits(1.0, -1.0),
    ));

    assert!(matches!(
        scene.create_kinematic_articulation(&builder),
        Err(SceneError::InvalidLimits { link: 1, .. })
    ));
    assert!(matches!(
        scene.create_articulation(&builder),
        Err(SceneError::InvalidLimits { link: 1, .. })
    ));
    assert_eq!(scene.link_count(), 0);
    assert_eq!(scene.physics().body_count(), 0);
}

#[test]
fn unknown_articulation_reported() {
    let mut scene = zero_gravity_scene();
    let id = scene.create_articulation(&planar_chain(2)).unwrap();
    scene.remove_articulation(id).unwrap();

    assert!(matches!(
        scene.set_root_pose(id, Transform::IDENTITY),
        Err(SceneError::ArticulationNotFound(missing)) if missing == id
    ));
}

#[test]
fn plugin_steps_scene_each_update() {
    let mut app = scene_test_app(SceneConfig::default());
    let id = app
        .world_mut()
        .resource_mut::<Scene>()
        .create_articulation(&pendulum())
        .unwrap();

    for _ in 0..30 {
        app.update();
    }

    let scene = app.world().resource::<Scene>();
    let q = scene.articulation(id).unwrap().qpos(scene.physics());
    assert!(q[0].abs() > 0.01, "plugin did not advance physics: {q:?}");
}
