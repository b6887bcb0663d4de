//! Joint description, rapier joint construction and joint-space readback.

use bevy::prelude::{Quat, Transform, Vec3};
use rapier3d::prelude::{
    FixedJointBuilder, GenericJoint, JointAxis, PrismaticJointBuilder, RevoluteJointBuilder,
};

// ---------------------------------------------------------------------------
// JointKind
// ---------------------------------------------------------------------------

/// Kind of joint connecting a link to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JointKind {
    /// No relative motion between parent and child.
    #[default]
    Fixed,
    /// Rotation about a single axis, with optional position limits.
    Revolute,
    /// Unlimited rotation about a single axis.
    Continuous,
    /// Translation along an axis, with optional position limits.
    Prismatic,
}

impl JointKind {
    /// Whether this joint contributes a degree of freedom.
    pub const fn is_actuated(self) -> bool {
        matches!(self, Self::Revolute | Self::Continuous | Self::Prismatic)
    }
}

// ---------------------------------------------------------------------------
// JointSpec
// ---------------------------------------------------------------------------

/// Joint from a parent link to a child link.
///
/// `origin` is the child frame's offset in the parent frame at zero joint
/// position. Link frames share the parent's orientation at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSpec {
    pub kind: JointKind,
    /// Unit axis of motion in the parent frame.
    pub axis: Vec3,
    pub origin: Vec3,
    /// `[lower, upper]` position limits. Ignored for fixed and continuous joints.
    pub limits: Option<[f32; 2]>,
}

impl JointSpec {
    pub fn fixed(origin: Vec3) -> Self {
        Self {
            kind: JointKind::Fixed,
            axis: Vec3::X,
            origin,
            limits: None,
        }
    }

    pub fn revolute(axis: Vec3, origin: Vec3) -> Self {
        Self {
            kind: JointKind::Revolute,
            axis: axis.normalize_or(Vec3::X),
            origin,
            limits: None,
        }
    }

    pub fn continuous(axis: Vec3, origin: Vec3) -> Self {
        Self {
            kind: JointKind::Continuous,
            ..Self::revolute(axis, origin)
        }
    }

    pub fn prismatic(axis: Vec3, origin: Vec3) -> Self {
        Self {
            kind: JointKind::Prismatic,
            ..Self::revolute(axis, origin)
        }
    }

    #[must_use]
    pub const fn with_limits(mut self, lower: f32, upper: f32) -> Self {
        self.limits = Some([lower, upper]);
        self
    }

    /// Build the rapier joint for this spec.
    pub fn to_generic_joint(&self) -> GenericJoint {
        match self.kind {
            JointKind::Revolute | JointKind::Continuous => {
                let mut joint: GenericJoint = RevoluteJointBuilder::new(self.axis)
                    .local_anchor1(self.origin)
                    .build()
                    .into();
                if self.kind == JointKind::Revolute
                    && let Some([lo, hi]) = self.limits
                {
                    joint.set_limits(JointAxis::AngX, [lo, hi]);
                }
                joint
            }
            JointKind::Prismatic => {
                let mut joint: GenericJoint = PrismaticJointBuilder::new(self.axis)
                    .local_anchor1(self.origin)
                    .build()
                    .into();
                if let Some([lo, hi]) = self.limits {
                    joint.set_limits(JointAxis::LinX, [lo, hi]);
                }
                joint
            }
            JointKind::Fixed => FixedJointBuilder::new()
                .local_anchor1(self.origin)
                .build()
                .into(),
        }
    }

    /// Child pose relative to the parent for joint position `q`.
    pub fn local_transform(&self, q: f32) -> Transform {
        let motion = match self.kind {
            JointKind::Revolute | JointKind::Continuous => {
                Transform::from_rotation(Quat::from_axis_angle(self.axis, q))
            }
            JointKind::Prismatic => Transform::from_translation(self.axis * q),
            JointKind::Fixed => Transform::IDENTITY,
        };
        Transform::from_translation(self.origin) * motion
    }

    /// Joint position recovered from the world poses of parent and child.
    pub fn position_from_poses(&self, parent: &Transform, child: &Transform) -> f32 {
        match self.kind {
            JointKind::Prismatic => {
                let anchor = parent.translation + parent.rotation * self.origin;
                let world_axis = parent.rotation * self.axis;
                (child.translation - anchor).dot(world_axis)
            }
            JointKind::Revolute | JointKind::Continuous => {
                let rel = parent.rotation.inverse() * child.rotation;
                // q and -q are the same rotation; pick w >= 0 so the angle
                // lands in [-pi, pi].
                let rel = if rel.w < 0.0 { -rel } else { rel };
                let sin_half = Vec3::new(rel.x, rel.y, rel.z);
                2.0 * f32::atan2(sin_half.dot(self.axis), rel.w)
            }
            JointKind::Fixed => 0.0,
        }
    }

    /// Joint velocity from the world-frame velocities of parent and child.
    ///
    /// Each pair is `(linear, angular)`, where the linear part is the velocity
    /// of that body's material point at the child frame origin, not of its
    /// centre of mass.
    pub fn velocity_from_bodies(
        &self,
        parent: &Transform,
        parent_vel: (Vec3, Vec3),
        child_vel: (Vec3, Vec3),
    ) -> f32 {
        let world_axis = parent.rotation * self.axis;
        let (parent_lin, parent_ang) = parent_vel;
        let (child_lin, child_ang) = child_vel;
        match self.kind {
            JointKind::Prismatic => (child_lin - parent_lin).dot(world_axis),
            JointKind::Revolute | JointKind::Continuous => {
                (child_ang - parent_ang).dot(world_axis)
            }
            JointKind::Fixed => 0.0,
        }
    }
}
