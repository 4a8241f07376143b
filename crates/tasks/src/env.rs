use physics::CameraSpec;
use serde::{Deserialize, Serialize};

use crate::error::EnvError;

/// Key under which the per-instance success flags are serialized.
pub const SUCCESS_KEY: &str = "success";

/// Batched observation stored row-major: one row of `dim` floats per
/// environment instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Observation {
    pub data: Vec<f32>,
    pub dim: usize,
}

impl Observation {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Observation row of one environment instance.
    #[must_use]
    pub fn row(&self, env: usize) -> &[f32] {
        let start = env * self.dim;
        self.data.get(start..start + self.dim).unwrap_or(&[])
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }
}

/// Options accepted by [`Env::reset`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetOptions {
    /// Rebuild the scene before resetting
    pub reconfigure: bool,
    /// Environment instances to reset; all of them when `None`
    pub env_idx: Option<Vec<usize>>,
    /// Reseed the environment's random generator
    pub seed: Option<u64>,
}

impl ResetOptions {
    #[must_use]
    pub fn reconfigure() -> Self {
        Self {
            reconfigure: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_env_idx(mut self, env_idx: Vec<usize>) -> Self {
        self.env_idx = Some(env_idx);
        self
    }
}

/// Per-instance diagnostics returned with every observation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StepInfo {
    /// Serialized under [`SUCCESS_KEY`]
    pub success: Vec<bool>,
    pub elapsed_steps: Vec<u32>,
}

/// Result of a single batched step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepOutput {
    pub obs: Observation,
    pub reward: Vec<f32>,
    pub terminated: Vec<bool>,
    pub truncated: Vec<bool>,
    pub info: StepInfo,
}

impl StepOutput {
    /// True once every instance has terminated or been truncated.
    #[must_use]
    pub fn all_done(&self) -> bool {
        self.terminated
            .iter()
            .zip(&self.truncated)
            .all(|(&term, &trunc)| term || trunc)
    }
}

/// Scene snapshot handed to the external renderer for one camera.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub camera: CameraSpec,
    pub elapsed_steps: u32,
    /// Actor name and column-major model matrix, for instance 0
    pub actors: Vec<(String, [[f32; 4]; 4])>,
}

/// Batched reinforcement learning environment.
///
/// Modeled after the classic Gym interface, except that every quantity is a
/// vector over [`Env::num_envs`] parallel instances. Each call to
/// [`Env::step`] advances all instances by one control step.
pub trait Env {
    /// Number of parallel environment instances.
    fn num_envs(&self) -> usize;

    /// Size of the observation row of one instance.
    fn observation_size(&self) -> usize;

    /// Size of the action vector of one instance.
    fn action_size(&self) -> usize;

    /// Reset the selected instances and return the initial observation.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range environment indices or scene construction errors.
    fn reset(&mut self, options: ResetOptions) -> Result<(Observation, StepInfo), EnvError>;

    /// Advance all instances by one action.
    ///
    /// `action` holds `num_envs * action_size` values, or `action_size`
    /// values applied to every instance.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ActionShape`] for a wrongly sized action.
    fn step(&mut self, action: &[f32]) -> Result<StepOutput, EnvError>;

    /// Frames for every camera, empty when rendering is disabled.
    fn render(&self) -> Vec<Frame>;

    /// Uniformly random action for all instances.
    fn sample_action(&mut self) -> Vec<f32>;
}
