//! The medicine sorting environment.

use physics::transform::to_transform_matrix;
use physics::{CameraSpec, Scene, TableSceneBuilder, Vec3};
use tracing::{debug, info};

use super::episode::initialize_items;
use super::evaluate::{evaluate, Evaluation};
use super::reward::{compute_reward, dense_reward, normalized_dense_reward};
use super::scene::{populate, SortingScene};
use super::task::TaskConfig;
use crate::agent::Agent;
use crate::config::{EnvConfig, ObsMode, RenderMode, RobotUid};
use crate::env::{Env, Frame, Observation, ResetOptions, StepInfo, StepOutput};
use crate::error::EnvError;

pub const ENV_ID: &str = "MedicineSortEnv-v1";
pub const MAX_EPISODE_STEPS: u32 = 100;
pub const SUPPORTED_ROBOTS: &[RobotUid] = &[RobotUid::Panda];

/// Position (3) and quaternion (4) of an item
const ITEM_OBS: usize = 7;
/// Planar bin center
const BIN_OBS: usize = 2;

fn default_render_camera() -> CameraSpec {
    let pose = CameraSpec::look_at(Vec3::new(0.6, 0.7, 0.6), Vec3::new(0.0, 0.0, 0.35));
    CameraSpec::new("render_camera", 512, 512)
        .with_pose(pose)
        .with_fovy(1.0)
        .with_clip_planes(0.01, 100.0)
}

/// Sort a pill, a bottle and a syringe into the bin of their category.
///
/// The scene is built at construction and rebuilt on a reconfiguring reset.
/// Every reset resamples item poses for the selected instances; every step
/// evaluates success and reward from the current pose snapshot only.
pub struct MedicineSortEnv {
    config: EnvConfig,
    task: TaskConfig,
    table: TableSceneBuilder,
    max_episode_steps: u32,
    rng: fastrand::Rng,
    agent: Agent,
    scene: Scene,
    sorting: SortingScene,
    elapsed_steps: Vec<u32>,
}

impl MedicineSortEnv {
    /// Create the environment with the default task definition.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or an unsupported robot.
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        Self::with_task(config, TaskConfig::default())
    }

    /// Create the environment for a custom task definition.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, an invalid task or an unsupported
    /// robot.
    pub fn with_task(config: EnvConfig, task: TaskConfig) -> Result<Self, EnvError> {
        config.validate()?;
        task.validate()?;
        let agent = Agent::new(config.robot_uids, SUPPORTED_ROBOTS, config.num_envs)?;
        let rng = config.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let table = TableSceneBuilder::default();
        let (scene, sorting) = Self::load_scene(&config, &table, &task)?;
        Ok(Self {
            max_episode_steps: config.max_episode_steps.unwrap_or(MAX_EPISODE_STEPS),
            elapsed_steps: vec![0; config.num_envs],
            config,
            task,
            table,
            rng,
            agent,
            scene,
            sorting,
        })
    }

    fn load_scene(config: &EnvConfig, table: &TableSceneBuilder, task: &TaskConfig) -> Result<(Scene, SortingScene), EnvError> {
        let mut scene = Scene::new(config.num_envs)?;
        let sorting = populate(&mut scene, table, task)?;
        scene.add_camera(default_render_camera());
        info!(
            "Loaded medicine sorting scene: {} envs, {} actors",
            config.num_envs,
            scene.actors().len()
        );
        Ok((scene, sorting))
    }

    /// Drop the current scene and build a fresh one. Cameras of the old scene
    /// are carried over.
    ///
    /// # Errors
    ///
    /// Propagates scene construction errors.
    pub fn reconfigure(&mut self) -> Result<(), EnvError> {
        let (mut scene, sorting) = Self::load_scene(&self.config, &self.table, &self.task)?;
        for camera in self.scene.cameras() {
            scene.add_camera(camera.clone());
        }
        self.scene = scene;
        self.sorting = sorting;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn task(&self) -> &TaskConfig {
        &self.task
    }

    #[must_use]
    pub fn max_episode_steps(&self) -> u32 {
        self.max_episode_steps
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access for the simulation driver, e.g. to move items directly.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn sorting(&self) -> &SortingScene {
        &self.sorting
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub fn elapsed_steps(&self) -> &[u32] {
        &self.elapsed_steps
    }

    /// Evaluate the current pose snapshot.
    ///
    /// # Errors
    ///
    /// Propagates scene lookup errors.
    pub fn evaluate(&self) -> Result<Evaluation, EnvError> {
        evaluate(&self.scene, &self.sorting.items, &self.task)
    }

    #[must_use]
    pub fn compute_dense_reward(&self, eval: &Evaluation) -> Vec<f32> {
        dense_reward(eval, &self.task)
    }

    #[must_use]
    pub fn compute_normalized_dense_reward(&self, eval: &Evaluation) -> Vec<f32> {
        normalized_dense_reward(eval, &self.task)
    }

    /// Add or replace a camera in the current scene.
    pub fn add_camera(&mut self, camera: CameraSpec) {
        self.scene.add_camera(camera);
    }

    fn all_envs(&self) -> Vec<usize> {
        (0..self.config.num_envs).collect()
    }

    fn info(&self, eval: &Evaluation) -> StepInfo {
        StepInfo {
            success: eval.success.clone(),
            elapsed_steps: self.elapsed_steps.clone(),
        }
    }

    fn observe(&self) -> Result<Observation, EnvError> {
        if self.config.obs_mode == ObsMode::None {
            return Ok(Observation::empty());
        }
        let dim = self.observation_size();
        let mut data = Vec::with_capacity(dim * self.config.num_envs);
        for env in 0..self.config.num_envs {
            data.extend_from_slice(self.agent.qpos(env));
            data.extend_from_slice(self.agent.qvel(env));
            for item in &self.sorting.items {
                let pose = self.scene.pose(item.actor)?[env];
                data.extend_from_slice(&pose.p.to_array());
                data.extend_from_slice(&pose.q.to_array());
            }
            for bin in &self.sorting.bins {
                let p = self.scene.pose(bin.actor)?[env].p;
                data.extend_from_slice(&[p.x, p.y]);
            }
        }
        Ok(Observation { data, dim })
    }

    fn expand_action(&self, action: &[f32]) -> Result<Vec<f32>, EnvError> {
        let num_envs = self.config.num_envs;
        let action_size = Agent::ACTION_SIZE;
        let expected = num_envs * action_size;
        if action.len() == expected {
            Ok(action.to_vec())
        } else if action.len() == action_size {
            Ok(action.repeat(num_envs))
        } else {
            Err(EnvError::ActionShape {
                expected,
                got: action.len(),
                num_envs,
                action_size,
            })
        }
    }
}

impl Env for MedicineSortEnv {
    fn num_envs(&self) -> usize {
        self.config.num_envs
    }

    fn observation_size(&self) -> usize {
        match self.config.obs_mode {
            ObsMode::None => 0,
            ObsMode::State => {
                2 * Agent::DOF + ITEM_OBS * self.sorting.items.len() + BIN_OBS * self.sorting.bins.len()
            }
        }
    }

    fn action_size(&self) -> usize {
        Agent::ACTION_SIZE
    }

    fn reset(&mut self, options: ResetOptions) -> Result<(Observation, StepInfo), EnvError> {
        if let Some(seed) = options.seed {
            self.rng = fastrand::Rng::with_seed(seed);
        }
        if options.reconfigure {
            self.reconfigure()?;
        }
        // a rebuilt scene has no valid poses anywhere, so every instance resets
        let env_idx = match options.env_idx {
            Some(env_idx) if !options.reconfigure => env_idx,
            _ => self.all_envs(),
        };
        let num_envs = self.config.num_envs;
        if let Some(&index) = env_idx.iter().find(|&&i| i >= num_envs) {
            return Err(EnvError::EnvIndexOutOfRange { index, num_envs });
        }

        self.table
            .initialize(&mut self.scene, &self.sorting.furniture, &env_idx)?;
        self.agent.reset(&env_idx);
        initialize_items(
            &mut self.scene,
            &self.sorting.items,
            &env_idx,
            &self.task.spawn,
            &mut self.rng,
        )?;
        for &env in &env_idx {
            self.elapsed_steps[env] = 0;
        }
        debug!("Reset {} of {} envs", env_idx.len(), num_envs);

        let eval = self.evaluate()?;
        Ok((self.observe()?, self.info(&eval)))
    }

    fn step(&mut self, action: &[f32]) -> Result<StepOutput, EnvError> {
        let action = self.expand_action(action)?;
        let control_dt = 1.0 / self.config.control_freq as f32;
        for (env, row) in action.chunks_exact(Agent::ACTION_SIZE).enumerate() {
            self.agent.set_action(env, row, control_dt);
        }
        let dt = self.config.sim_timestep();
        for _ in 0..self.config.sim_steps_per_control() {
            self.scene.step(dt);
        }
        for steps in &mut self.elapsed_steps {
            *steps = steps.saturating_add(1);
        }

        let eval = self.evaluate()?;
        let reward = compute_reward(self.config.reward_mode, &eval, &self.task);
        let truncated = self
            .elapsed_steps
            .iter()
            .map(|&steps| steps >= self.max_episode_steps)
            .collect();
        let info = self.info(&eval);
        Ok(StepOutput {
            obs: self.observe()?,
            reward,
            terminated: eval.success,
            truncated,
            info,
        })
    }

    fn render(&self) -> Vec<Frame> {
        if self.config.render_mode == RenderMode::None {
            return Vec::new();
        }
        let actors: Vec<(String, [[f32; 4]; 4])> = self
            .scene
            .actors()
            .iter()
            .filter_map(|a| a.poses().first().map(|pose| (a.name.clone(), to_transform_matrix(pose))))
            .collect();
        let elapsed_steps = self.elapsed_steps.first().copied().unwrap_or(0);
        self.scene
            .cameras()
            .iter()
            .map(|camera| Frame {
                camera: camera.clone(),
                elapsed_steps,
                actors: actors.clone(),
            })
            .collect()
    }

    fn sample_action(&mut self) -> Vec<f32> {
        self.agent.sample_action(&mut self.rng)
    }
}
