//! Per-episode randomization of item poses.

use std::f32::consts::TAU;

use physics::transform::yaw_to_quat;
use physics::{Pose, Scene, Vec3};

use super::scene::TaskEntity;
use super::task::SpawnRegion;
use crate::error::EnvError;

/// Draw one resting pose inside `spawn`: uniform x and y in the spawn square,
/// fixed rest height, uniform yaw in `[0, 2pi)` with zero roll and pitch.
pub fn sample_pose(rng: &mut fastrand::Rng, spawn: &SpawnRegion) -> Pose {
    let width = 2.0 * spawn.half_extent;
    let x = spawn.center[0] - spawn.half_extent + rng.f32() * width;
    let y = spawn.center[1] - spawn.half_extent + rng.f32() * width;
    let yaw = rng.f32() * TAU;
    Pose::from_pq(Vec3::new(x, y, spawn.rest_height), yaw_to_quat(yaw))
}

/// Place every item at an independently sampled pose in each listed
/// environment instance. Instances outside `env_idx` are left untouched.
///
/// Items are not kept apart and may start overlapping.
///
/// # Errors
///
/// Propagates out-of-range environment indices from the scene.
pub fn initialize_items(
    scene: &mut Scene,
    items: &[TaskEntity],
    env_idx: &[usize],
    spawn: &SpawnRegion,
    rng: &mut fastrand::Rng,
) -> Result<(), EnvError> {
    for item in items {
        let poses: Vec<Pose> = env_idx.iter().map(|_| sample_pose(rng, spawn)).collect();
        scene.set_pose(item.actor, env_idx, &poses)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_spawn_square() {
        let spawn = SpawnRegion::default();
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..1000 {
            let pose = sample_pose(&mut rng, &spawn);
            assert!((-0.2..=0.2).contains(&pose.p.x));
            assert!((-0.2..=0.2).contains(&pose.p.y));
            assert!((pose.p.z - 0.02).abs() < 1e-6);
            // upright: the local vertical axis stays vertical
            assert!((pose.q * Vec3::Z - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn draws_differ_between_samples() {
        let spawn = SpawnRegion::default();
        let mut rng = fastrand::Rng::with_seed(11);
        let a = sample_pose(&mut rng, &spawn);
        let b = sample_pose(&mut rng, &spawn);
        assert_ne!(a, b);
    }
}
