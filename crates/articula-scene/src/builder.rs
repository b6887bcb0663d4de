//! Description of an articulation before it is created in a scene.

use bevy::prelude::{Transform, Vec3};

use articula_core::error::SceneError;
use articula_physics::context::BodyMass;
use articula_physics::joint::JointSpec;

use crate::render::RenderBody;
use crate::topology::ArticulationJoint;

// ---------------------------------------------------------------------------
// LinkSpec
// ---------------------------------------------------------------------------

/// One link of an [`ArticulationBuilder`].
#[derive(Debug, Clone)]
pub struct LinkSpec {
    pub name: String,
    /// Index of the parent link. `None` only for the root.
    pub parent: Option<usize>,
    /// Joint to the parent. Ignored for the root.
    pub joint: JointSpec,
    pub mass: BodyMass,
    pub render_bodies: Vec<RenderBody>,
    pub collision_bodies: Vec<RenderBody>,
}

impl LinkSpec {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            joint: JointSpec::fixed(Vec3::ZERO),
            mass: BodyMass::default(),
            render_bodies: Vec::new(),
            collision_bodies: Vec::new(),
        }
    }

    pub fn child(name: impl Into<String>, parent: usize, joint: JointSpec) -> Self {
        Self {
            parent: Some(parent),
            joint,
            ..Self::root(name)
        }
    }

    #[must_use]
    pub const fn with_mass(mut self, mass: BodyMass) -> Self {
        self.mass = mass;
        self
    }

    #[must_use]
    pub fn with_render_bodies(mut self, bodies: Vec<RenderBody>) -> Self {
        self.render_bodies = bodies;
        self
    }

    #[must_use]
    pub fn with_collision_bodies(mut self, bodies: Vec<RenderBody>) -> Self {
        self.collision_bodies = bodies;
        self
    }
}

// ---------------------------------------------------------------------------
// ArticulationBuilder
// ---------------------------------------------------------------------------

/// Ordered link tree used by `Scene::create_articulation` and
/// `Scene::create_kinematic_articulation`.
///
/// Links must be added parents-first: link 0 is the root, and every other
/// link's parent index is smaller than its own.
#[derive(Debug, Clone, Default)]
pub struct ArticulationBuilder {
    name: String,
    root_pose: Transform,
    fixed_base: bool,
    links: Vec<LinkSpec>,
}

impl ArticulationBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pin the root link in place. Only meaningful for dynamic articulations.
    #[must_use]
    pub const fn fixed_base(mut self, fixed: bool) -> Self {
        self.fixed_base = fixed;
        self
    }

    #[must_use]
    pub const fn root_pose(mut self, pose: Transform) -> Self {
        self.root_pose = pose;
        self
    }

    /// Append a link and return its index.
    pub fn add_link(&mut self, link: LinkSpec) -> usize {
        self.links.push(link);
        self.links.len() - 1
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_fixed_base(&self) -> bool {
        self.fixed_base
    }

    pub const fn initial_root_pose(&self) -> Transform {
        self.root_pose
    }

    pub fn links(&self) -> &[LinkSpec] {
        &self.links
    }

    /// Check the tree is non-empty, rooted at link 0 and parents-first, and
    /// that every joint limit pair is finite and ordered.
    pub fn validate(&self) -> Result<(), SceneError> {
        let Some(root) = self.links.first() else {
            return Err(SceneError::EmptyArticulation);
        };
        if let Some(parent) = root.parent {
            return Err(SceneError::InvalidParent { link: 0, parent });
        }
        for (index, link) in self.links.iter().enumerate().skip(1) {
            match link.parent {
                None => return Err(SceneError::MissingParent(index)),
                Some(parent) if parent >= index => {
                    return Err(SceneError::InvalidParent {
                        link: index,
                        parent,
                    });
                }
                Some(_) => {}
            }
            if let Some([lower, upper]) = link.joint.limits
                && !(lower.is_finite() && upper.is_finite() && lower <= upper)
            {
                return Err(SceneError::InvalidLimits {
                    link: index,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }

    /// Joints for every non-root link, in link order.
    pub fn joints(&self) -> Vec<ArticulationJoint> {
        self.links
            .iter()
            .enumerate()
            .filter_map(|(child, link)| {
                link.parent.map(|parent| ArticulationJoint {
                    parent,
                    child,
                    spec: link.joint.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm() -> ArticulationBuilder {
        let mut builder = ArticulationBuilder::new("arm");
        let base = builder.add_link(LinkSpec::root("base"));
        let upper = builder.add_link(LinkSpec::child(
            "upper",
            base,
            JointSpec::revolute(Vec3::Z, Vec3::new(0.0, 0.0, 0.1)),
        ));
        builder.add_link(LinkSpec::child(
            "lower",
            upper,
            JointSpec::revolute(Vec3::Y, Vec3::new(0.5, 0.0, 0.0)),
        ));
        builder
    }

    #[test]
    fn valid_tree() {
        let builder = arm();
        assert!(builder.validate().is_ok());
        assert_eq!(builder.links().len(), 3);
        assert_eq!(builder.name(), "arm");
    }

    #[test]
    fn joints_skip_root() {
        let joints = arm().joints();
        assert_eq!(joints.len(), 2);
        assert_eq!((joints[0].parent, joints[0].child), (0, 1));
        assert_eq!((joints[1].parent, joints[1].child), (1, 2));
    }

    #[test]
    fn empty_is_rejected() {
        let err = ArticulationBuilder::new("empty").validate().unwrap_err();
        assert!(matches!(err, SceneError::EmptyArticulation));
    }

    #[test]
    fn root_with_parent_is_rejected() {
        let mut builder = ArticulationBuilder::new("bad");
        builder.add_link(LinkSpec::child("root", 0, JointSpec::fixed(Vec3::ZERO)));
        assert!(matches!(
            builder.validate().unwrap_err(),
            SceneError::InvalidParent { link: 0, parent: 0 }
        ));
    }

    #[test]
    fn second_root_is_rejected() {
        let mut builder = ArticulationBuilder::new("bad");
        builder.add_link(LinkSpec::root("a"));
        builder.add_link(LinkSpec::root("b"));
        assert!(matches!(
            builder.validate().unwrap_err(),
            SceneError::MissingParent(1)
        ));
    }

    #[test]
    fn forward_parent_is_rejected() {
        let mut builder = ArticulationBuilder::new("bad");
        builder.add_link(LinkSpec::root("a"));
        builder.add_link(LinkSpec::child("b", 2, JointSpec::fixed(Vec3::ZERO)));
        builder.add_link(LinkSpec::child("c", 0, JointSpec::fixed(Vec3::ZERO)));
        assert!(matches!(
            builder.validate().unwrap_err(),
            SceneError::InvalidParent { link: 1, parent: 2 }
        ));
    }

    #[test]
    fn inverted_limits_are_rejected() {
        let mut builder = ArticulationBuilder::new("bad");
        let root = builder.add_link(LinkSpec::root("a"));
        builder.add_link(LinkSpec::child(
            "b",
            root,
            JointSpec::revolute(Vec3::Z, Vec3::X).with_limits(1.0, -1.0),
        ));
        assert!(matches!(
            builder.validate().unwrap_err(),
            SceneError::InvalidLimits { link: 1, .. }
        ));
    }

    #[test]
    fn nan_limits_are_rejected() {
        let mut builder = ArticulationBuilder::new("bad");
        let root = builder.add_link(LinkSpec::root("a"));
        let b = builder.add_link(LinkSpec::child(
            "b",
            root,
            JointSpec::revolute(Vec3::Z, Vec3::X).with_limits(-1.0, 1.0),
        ));
        builder.add_link(LinkSpec::child(
            "c",
            b,
            JointSpec::prismatic(Vec3::X, Vec3::ZERO).with_limits(f32::NAN, 0.5),
        ));
        assert!(matches!(
            builder.validate().unwrap_err(),
            SceneError::InvalidLimits { link: 2, .. }
        ));
    }

    #[test]
    fn equal_limits_are_accepted() {
        let mut builder = ArticulationBuilder::new("locked");
        let root = builder.add_link(LinkSpec::root("a"));
        builder.add_link(LinkSpec::child(
            "b",
            root,
            JointSpec::prismatic(Vec3::X, Vec3::ZERO).with_limits(0.0, 0.0),
        ));
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn builder_options() {
        let pose = Transform::from_translation(Vec3::ONE);
        let builder = ArticulationBuilder::new("x").fixed_base(true).root_pose(pose);
        assert!(builder.is_fixed_base());
        assert_eq!(builder.initial_root_pose(), pose);
    }
}
