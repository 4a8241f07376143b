//! Transform utilities for physics objects
//!
//! Conversions between poses (position + quaternion), Euler angles and the
//! 4x4 model matrices handed to the renderer.

use glam::{EulerRot, Mat4, Quat};

use crate::types::Pose;

/// Quaternion from static-axis roll, pitch and yaw (radians), applied in
/// x, y, z order.
#[must_use]
pub fn euler_to_quat(roll: f32, pitch: f32, yaw: f32) -> Quat {
    Quat::from_euler(EulerRot::ZYX, yaw, pitch, roll)
}

/// Rotation about the vertical axis only.
#[must_use]
pub fn yaw_to_quat(yaw: f32) -> Quat {
    Quat::from_rotation_z(yaw)
}

/// Yaw of a quaternion about the vertical axis, in `(-pi, pi]`.
#[must_use]
pub fn quat_to_yaw(q: Quat) -> f32 {
    let (yaw, _, _) = q.to_euler(EulerRot::ZYX);
    yaw
}

/// Convert a pose to a column-major 4x4 model matrix
#[must_use]
pub fn to_transform_matrix(pose: &Pose) -> [[f32; 4]; 4] {
    Mat4::from_rotation_translation(pose.q, pose.p).to_cols_array_2d()
}
