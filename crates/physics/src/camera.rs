//! Camera descriptions consumed by the external renderer.
//!
//! A camera follows the robotics convention: its local +x axis is the viewing
//! direction and +z is up.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::Pose;

/// Pinhole camera mounted in the scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub name: String,
    pub pose: Pose,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Vertical field of view in radians
    pub fovy: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl CameraSpec {
    #[must_use]
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_owned(),
            pose: Pose::IDENTITY,
            width,
            height,
            fovy: 1.0,
            near: 0.01,
            far: 100.0,
        }
    }

    #[must_use]
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    #[must_use]
    pub fn with_fovy(mut self, fovy: f32) -> Self {
        self.fovy = fovy;
        self
    }

    #[must_use]
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Camera pose looking from `eye` toward `target`.
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3) -> Pose {
        let forward = (target - eye).normalize_or_zero();
        if forward == Vec3::ZERO {
            return Pose::from_position(eye);
        }
        let yaw = forward.y.atan2(forward.x);
        let pitch = -forward.z.asin();
        Pose::from_pq(eye, Quat::from_rotation_z(yaw) * Quat::from_rotation_y(pitch))
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// World-to-camera matrix in the OpenGL convention (-z forward, +y up).
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.pose.p;
        let forward = self.pose.q * Vec3::X;
        let up = self.pose.q * Vec3::Z;
        Mat4::look_to_rh(eye, forward, up)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect(), self.near, self.far)
    }

    /// Computes a view projection matrix from the camera parameters
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
