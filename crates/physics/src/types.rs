use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform of an actor: position `p` and orientation quaternion `q`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub p: Vec3,
    pub q: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        p: Vec3::ZERO,
        q: Quat::IDENTITY,
    };

    #[must_use]
    pub const fn from_pq(p: Vec3, q: Quat) -> Self {
        Self { p, q }
    }

    #[must_use]
    pub const fn from_position(p: Vec3) -> Self {
        Self {
            p,
            q: Quat::IDENTITY,
        }
    }

    /// Planar (x, y) distance to a point, ignoring height.
    #[must_use]
    pub fn planar_distance(&self, xy: [f32; 2]) -> f32 {
        let dx = self.p.x - xy[0];
        let dy = self.p.y - xy[1];
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Linear RGBA color used for visual materials.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Whether an actor is moved by the simulation or fixed in the world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Dynamic,
    Static,
}

/// Handle to an actor inside a [`crate::Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);
