//! Single-arm manipulator used by tabletop tasks.
//!
//! Only the joint-space bookkeeping the tasks need is modeled: a joint
//! position per instance, a delta-position controller and the action bounds.
//! Link geometry and dynamics belong to the simulation engine.

use std::f32::consts::PI;

use crate::config::RobotUid;
use crate::error::EnvError;

const ARM_JOINTS: usize = 7;
const FINGER_JOINTS: usize = 2;
const DOF: usize = ARM_JOINTS + FINGER_JOINTS;
/// Joint-space displacement for a unit arm action (radians)
const ARM_DELTA_SCALE: f32 = 0.1;
const FINGER_OPEN: f32 = 0.04;

const REST_QPOS: [f32; DOF] = [
    0.0,
    PI / 8.0,
    0.0,
    -5.0 * PI / 8.0,
    0.0,
    3.0 * PI / 4.0,
    PI / 4.0,
    FINGER_OPEN,
    FINGER_OPEN,
];

const JOINT_LIMITS: [(f32, f32); DOF] = [
    (-2.8973, 2.8973),
    (-1.7628, 1.7628),
    (-2.8973, 2.8973),
    (-3.0718, -0.0698),
    (-2.8973, 2.8973),
    (-0.0175, 3.7525),
    (-2.8973, 2.8973),
    (0.0, FINGER_OPEN),
    (0.0, FINGER_OPEN),
];

/// Joint-space state of the robot in every environment instance.
#[derive(Clone, Debug)]
pub struct Agent {
    pub uid: RobotUid,
    qpos: Vec<[f32; DOF]>,
    qvel: Vec<[f32; DOF]>,
}

impl Agent {
    pub const DOF: usize = DOF;
    /// Seven arm joint deltas and one gripper command
    pub const ACTION_SIZE: usize = ARM_JOINTS + 1;
    pub const ACTION_LOW: f32 = -1.0;
    pub const ACTION_HIGH: f32 = 1.0;

    /// Create the robot at its rest keyframe in every instance.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnsupportedRobot`] if `supported` does not list `uid`.
    pub fn new(uid: RobotUid, supported: &[RobotUid], num_envs: usize) -> Result<Self, EnvError> {
        if !supported.contains(&uid) {
            return Err(EnvError::UnsupportedRobot(uid.to_string()));
        }
        Ok(Self {
            uid,
            qpos: vec![REST_QPOS; num_envs],
            qvel: vec![[0.0; Self::DOF]; num_envs],
        })
    }

    #[must_use]
    pub fn qpos(&self, env: usize) -> &[f32; Self::DOF] {
        &self.qpos[env]
    }

    #[must_use]
    pub fn qvel(&self, env: usize) -> &[f32; Self::DOF] {
        &self.qvel[env]
    }

    /// Return the listed instances to the rest keyframe.
    pub fn reset(&mut self, env_idx: &[usize]) {
        for &env in env_idx {
            self.qpos[env] = REST_QPOS;
            self.qvel[env] = [0.0; Self::DOF];
        }
    }

    /// Apply one control step to instance `env`.
    ///
    /// Actions are clipped to the action bounds. Arm entries move the joint
    /// targets by a scaled delta; the gripper entry maps `[-1, 1]` onto the
    /// closed..open finger range.
    pub fn set_action(&mut self, env: usize, action: &[f32], control_dt: f32) {
        let previous = self.qpos[env];
        let qpos = &mut self.qpos[env];
        for (joint, &a) in action.iter().take(ARM_JOINTS).enumerate() {
            let delta = a.clamp(Self::ACTION_LOW, Self::ACTION_HIGH) * ARM_DELTA_SCALE;
            let (lo, hi) = JOINT_LIMITS[joint];
            qpos[joint] = (qpos[joint] + delta).clamp(lo, hi);
        }
        if let Some(&grip) = action.get(ARM_JOINTS) {
            let opening = (grip.clamp(Self::ACTION_LOW, Self::ACTION_HIGH) + 1.0) * 0.5 * FINGER_OPEN;
            qpos[ARM_JOINTS] = opening;
            qpos[ARM_JOINTS + 1] = opening;
        }
        let qpos = *qpos;
        for (v, (now, before)) in self.qvel[env].iter_mut().zip(qpos.iter().zip(previous.iter())) {
            *v = (now - before) / control_dt;
        }
    }

    /// Uniformly random action in bounds for every instance, row-major.
    pub fn sample_action(&self, rng: &mut fastrand::Rng) -> Vec<f32> {
        let span = Self::ACTION_HIGH - Self::ACTION_LOW;
        (0..self.qpos.len() * Self::ACTION_SIZE)
            .map(|_| Self::ACTION_LOW + rng.f32() * span)
            .collect()
    }
}
