//! Tree structure shared by both articulation kinds.

use bevy::prelude::Transform;

use articula_physics::joint::JointSpec;

/// Joint connecting link `child` to link `parent` (indices into the link list).
#[derive(Debug, Clone, PartialEq)]
pub struct ArticulationJoint {
    pub parent: usize,
    pub child: usize,
    pub spec: JointSpec,
}

impl ArticulationJoint {
    pub const fn is_actuated(&self) -> bool {
        self.spec.kind.is_actuated()
    }
}

/// Number of actuated joints.
pub fn dof(joints: &[ArticulationJoint]) -> usize {
    joints.iter().filter(|j| j.is_actuated()).count()
}

/// World pose of every link given the root pose and one position per
/// actuated joint (in joint order).
///
/// Joints must be ordered so that every parent is placed before its children.
/// Missing entries in `q` are treated as zero.
pub fn forward_kinematics(
    root: Transform,
    link_count: usize,
    joints: &[ArticulationJoint],
    q: &[f32],
) -> Vec<Transform> {
    let mut poses = vec![root; link_count];
    let mut qi = 0;
    for joint in joints {
        let value = if joint.is_actuated() {
            let v = q.get(qi).copied().unwrap_or(0.0);
            qi += 1;
            v
        } else {
            0.0
        };
        poses[joint.child] = poses[joint.parent] * joint.spec.local_transform(value);
    }
    poses
}
