//! Identity and body-list behaviour of both link variants, standalone and
//! as created by a scene.

use bevy::prelude::*;

use articula_core::error::LinkError;
use articula_core::ids::{ArticulationId, KinematicArticulationId, LinkId, SceneId};
use articula_physics::PhysicsContext;
use articula_physics::context::BodyMass;
use articula_scene::link::{DynamicLink, KinematicLink, Link, LinkRef};
use articula_scene::Scene;
use articula_test_utils::{pendulum, planar_chain, spawn_render_bodies};

#[test]
fn variants_with_same_id_keep_independent_bodies() {
    let mut world = World::new();
    let mut physics = PhysicsContext::default();
    let scene = SceneId::allocate();
    let render = spawn_render_bodies(&mut world, 3);
    let collision = spawn_render_bodies(&mut world, 2);
    let kin_render = spawn_render_bodies(&mut world, 1);

    let dynamic_actor =
        physics.insert_articulated_body(Transform::IDENTITY, BodyMass::default(), false);
    let kinematic_actor = physics.insert_kinematic_body(Transform::IDENTITY);

    let dynamic = DynamicLink::new(
        dynamic_actor,
        ArticulationId(7),
        LinkId(4),
        Some(scene),
        render.clone(),
        collision.clone(),
    )
    .unwrap();
    let kinematic = KinematicLink::new(
        kinematic_actor,
        KinematicArticulationId(7),
        LinkId(4),
        Some(scene),
        kin_render.clone(),
        Vec::new(),
    )
    .unwrap();

    assert_eq!(dynamic.id(), kinematic.id());
    assert_eq!(dynamic.scene(), kinematic.scene());
    assert_eq!(dynamic.actor_handle(), dynamic_actor);
    assert_eq!(kinematic.actor_handle(), kinematic_actor);
    assert_eq!(dynamic.articulation(), ArticulationId(7));
    assert_eq!(kinematic.articulation(), KinematicArticulationId(7));

    assert_eq!(dynamic.render_bodies(), render.as_slice());
    assert_eq!(dynamic.collision_bodies(), collision.as_slice());
    assert_eq!(kinematic.render_bodies(), kin_render.as_slice());
    assert!(kinematic.collision_bodies().is_empty());
}

#[test]
fn null_scene_rejected_for_both_variants() {
    let mut world = World::new();
    let mut physics = PhysicsContext::default();
    let bodies = spawn_render_bodies(&mut world, 2);

    let dynamic = DynamicLink::new(
        physics.insert_articulated_body(Transform::IDENTITY, BodyMass::default(), false),
        ArticulationId(1),
        LinkId(1),
        None,
        bodies.clone(),
        bodies.clone(),
    );
    assert!(matches!(dynamic, Err(LinkError::InvalidArgument(_))));

    let kinematic = KinematicLink::new(
        physics.insert_kinematic_body(Transform::IDENTITY),
        KinematicArticulationId(1),
        LinkId(1),
        None,
        bodies,
        Vec::new(),
    );
    assert!(matches!(kinematic, Err(LinkError::InvalidArgument(_))));
}

#[test]
fn scene_links_point_back_to_their_owners() {
    let mut scene = Scene::default();
    let dynamic = scene.create_articulation(&pendulum()).unwrap();
    let kinematic = scene.create_kinematic_articulation(&planar_chain(3)).unwrap();

    let articulation = scene.articulation(dynamic).unwrap();
    for link in articulation.links() {
        assert_eq!(link.articulation(), dynamic);
        assert_eq!(link.scene(), scene.id());
        assert!(scene.contains_actor(link.actor_handle()));
        assert!(matches!(scene.link(link.id()), Some(LinkRef::Dynamic(_))));
    }

    let kinematic_articulation = scene.kinematic_articulation(kinematic).unwrap();
    for link in kinematic_articulation.links() {
        assert_eq!(link.articulation(), kinematic);
        assert_eq!(link.scene(), scene.id());
        assert!(scene.contains_actor(link.actor_handle()));
        let found = scene.link(link.id()).and_then(LinkRef::as_kinematic).unwrap();
        assert_eq!(found.actor_handle(), link.actor_handle());
    }

    assert_eq!(scene.link_count(), 5);
}

#[test]
fn link_ids_are_unique_across_kinds() {
    let mut scene = Scene::default();
    let a = scene.create_articulation(&planar_chain(2)).unwrap();
    let k = scene.create_kinematic_articulation(&planar_chain(2)).unwrap();

    let mut ids: Vec<LinkId> = scene
        .articulation(a)
        .unwrap()
        .links()
        .iter()
        .map(Link::id)
        .chain(scene.kinematic_articulation(k).unwrap().links().iter().map(Link::id))
        .collect();
    ids.sort_by_key(|id| id.raw());
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn removing_articulation_destroys_links() {
    let mut scene = Scene::default();
    let id = scene.create_articulation(&pendulum()).unwrap();
    let link_ids: Vec<LinkId> = scene
        .articulation(id)
        .unwrap()
        .links()
        .iter()
        .map(Link::id)
        .collect();
    let actors: Vec<_> = scene
        .articulation(id)
        .unwrap()
        .links()
        .iter()
        .map(Link::actor_handle)
        .collect();

    scene.remove_articulation(id).unwrap();

    assert!(scene.articulation(id).is_none());
    for link in link_ids {
        assert!(scene.link(link).is_none());
    }
    for actor in actors {
        assert!(!scene.contains_actor(actor));
    }
    assert_eq!(scene.link_count(), 0);
}
