//! Small articulation descriptions and scenes used across test suites.

use bevy::prelude::Vec3;

use articula_core::config::SceneConfig;
use articula_physics::context::BodyMass;
use articula_physics::joint::JointSpec;
use articula_scene::builder::{ArticulationBuilder, LinkSpec};
use articula_scene::Scene;

/// A chain of `n` links hinged about Z, each 0.5 m along +X from its parent.
///
/// Produces `n - 1` degrees of freedom; `n` must be at least 1.
pub fn planar_chain(n: usize) -> ArticulationBuilder {
    let mut builder = ArticulationBuilder::new(format!("chain{n}")).fixed_base(true);
    let mut parent = builder.add_link(LinkSpec::root("link0"));
    for i in 1..n {
        parent = builder.add_link(LinkSpec::child(
            format!("link{i}"),
            parent,
            JointSpec::revolute(Vec3::Z, Vec3::new(0.5, 0.0, 0.0)),
        ));
    }
    builder
}

/// Fixed base with one free arm, hinged about Y, centre of mass 1 m along +X.
pub fn pendulum() -> ArticulationBuilder {
    let mut builder = ArticulationBuilder::new("pendulum").fixed_base(true);
    let base = builder.add_link(LinkSpec::root("base"));
    builder.add_link(
        LinkSpec::child("arm", base, JointSpec::continuous(Vec3::Y, Vec3::ZERO)).with_mass(
            BodyMass {
                mass: 0.5,
                com: Vec3::new(1.0, 0.0, 0.0),
                inertia: Vec3::splat(0.005),
            },
        ),
    );
    builder
}

/// Base, a vertical prismatic lift with limits, then a limited elbow.
pub fn slider_arm() -> ArticulationBuilder {
    let mut builder = ArticulationBuilder::new("slider_arm").fixed_base(true);
    let base = builder.add_link(LinkSpec::root("base"));
    let lift = builder.add_link(LinkSpec::child(
        "lift",
        base,
        JointSpec::prismatic(Vec3::Z, Vec3::new(0.0, 0.0, 0.2)).with_limits(0.0, 0.5),
    ));
    let elbow = builder.add_link(LinkSpec::child(
        "elbow",
        lift,
        JointSpec::revolute(Vec3::Z, Vec3::new(0.3, 0.0, 0.0)).with_limits(-1.0, 1.0),
    ));
    builder.add_link(LinkSpec::child(
        "tool",
        elbow,
        JointSpec::fixed(Vec3::new(0.2, 0.0, 0.0)),
    ));
    builder
}

/// A scene with gravity switched off, 1 ms physics steps and one substep
/// per control step.
pub fn zero_gravity_scene() -> Scene {
    Scene::new(SceneConfig {
        physics_dt: 0.001,
        control_dt: 0.001,
        gravity: [0.0; 3],
    })
    .expect("fixture config is valid")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
