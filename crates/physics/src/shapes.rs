use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Primitive geometry shared by visual and collision shapes.
///
/// Capsules and cylinders are aligned with the local x axis, matching the
/// convention of the actor builder's consumers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Capsule { radius: f32, half_length: f32 },
    Box { half_size: [f32; 3] },
    Cylinder { radius: f32, half_length: f32 },
}

impl Shape {
    #[must_use]
    pub const fn capsule(radius: f32, half_length: f32) -> Self {
        Self::Capsule {
            radius,
            half_length,
        }
    }

    #[must_use]
    pub const fn cuboid(half_size: [f32; 3]) -> Self {
        Self::Box { half_size }
    }

    #[must_use]
    pub const fn cylinder(radius: f32, half_length: f32) -> Self {
        Self::Cylinder {
            radius,
            half_length,
        }
    }

    /// Enclosed volume, used to derive a default mass.
    #[must_use]
    pub fn volume(&self) -> f32 {
        use std::f32::consts::PI;
        match *self {
            Self::Capsule {
                radius,
                half_length,
            } => PI * radius * radius * (2.0 * half_length) + (4.0 / 3.0) * PI * radius.powi(3),
            Self::Box { half_size } => 8.0 * half_size[0] * half_size[1] * half_size[2],
            Self::Cylinder {
                radius,
                half_length,
            } => PI * radius * radius * (2.0 * half_length),
        }
    }

    /// Signed distance from local point `p` to the surface.
    #[must_use]
    pub fn sdf(&self, p: Vec3) -> f32 {
        match *self {
            Self::Capsule {
                radius,
                half_length,
            } => {
                let x = p.x.clamp(-half_length, half_length);
                (p - Vec3::new(x, 0.0, 0.0)).length() - radius
            }
            Self::Box { half_size } => {
                let q = p.abs() - Vec3::from_array(half_size);
                let outside = q.max(Vec3::ZERO).length();
                let inside = q.max_element().min(0.0);
                outside + inside
            }
            Self::Cylinder {
                radius,
                half_length,
            } => {
                let radial = (p.y * p.y + p.z * p.z).sqrt() - radius;
                let axial = p.x.abs() - half_length;
                let outside = Vec3::new(radial.max(0.0), axial.max(0.0), 0.0).length();
                outside + radial.max(axial).min(0.0)
            }
        }
    }
}
