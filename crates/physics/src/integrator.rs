//! # Pose Integration
//!
//! Explicit Euler integration of actor positions from their linear
//! velocities. Contacts and gravity are not modeled; bodies drift only when a
//! velocity has been set.

use crate::scene::Actor;

/// Integration constants
const DAMPING_FACTOR: f32 = 0.98; // Velocity decay per step

/// Integrate every dynamic actor in every environment instance.
pub fn integrate_actors(actors: &mut [Actor], dt: f32) {
    for actor in actors.iter_mut().filter(|a| !a.is_static()) {
        for (pose, vel) in actor.poses.iter_mut().zip(actor.linear_velocities.iter_mut()) {
            pose.p += *vel * dt;
            *vel *= DAMPING_FACTOR;
        }
    }
}
