//! # Rollout Loop
//!
//! [`run`] plays a fixed number of episodes against the medicine sorting
//! environment with uniformly sampled actions. The `fixed_view` camera is
//! installed once and survives the reconfiguring reset of the first episode;
//! later episodes only reset poses.
//!
//! Each episode is bounded by `max_steps_per_episode` and ends early once all
//! instances succeed or are done. The stop flag is polled before every step so
//! an external interrupt ends the run between steps.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use physics::{CameraSpec, Pose};
use tasks::medicine_sort::{MedicineSortEnv, TaskConfig, ENV_ID};
use tasks::{default_registry, Env, EnvConfig, ResetOptions};

use crate::record::{EpisodeRecorder, ItemPose};

/// Name of the overview camera added by the runner.
pub const FIXED_VIEW: &str = "fixed_view";

/// Overview camera looking down on the table from the front left.
#[must_use]
pub fn fixed_view_camera() -> CameraSpec {
    // 45 degree pitch about y, stored (x, y, z, w)
    let q = Quat::from_xyzw(0.0, 0.3827, 0.0, 0.9239).normalize();
    CameraSpec::new(FIXED_VIEW, 1280, 720)
        .with_pose(Pose::from_pq(Vec3::new(0.5, -1.0, 0.8), q))
        .with_fovy(1.0)
        .with_clip_planes(0.1, 100.0)
}

/// Parameters of a rollout run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub env: EnvConfig,
    pub task: TaskConfig,
    pub episodes: u32,
    pub max_steps_per_episode: u32,
    /// Trajectories are written here when set
    pub output_dir: Option<PathBuf>,
    /// Progress is logged every this many steps
    pub log_every: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            env: EnvConfig::default(),
            task: TaskConfig::default(),
            episodes: 1,
            max_steps_per_episode: 200,
            output_dir: None,
            log_every: 50,
        }
    }
}

/// What happened during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub episodes_run: u32,
    pub successes: u32,
    pub total_steps: u64,
    pub interrupted: bool,
    pub written: Vec<PathBuf>,
}

/// Load a task definition from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a valid
/// task.
pub fn load_task(path: &Path) -> Result<TaskConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read task config {}", path.display()))?;
    let task = TaskConfig::from_json(&json)
        .with_context(|| format!("invalid task config {}", path.display()))?;
    Ok(task)
}

/// Create the environment, taking the step cap from the registry unless the
/// configuration overrides it.
///
/// # Errors
///
/// Fails if the environment rejects the configuration.
pub fn make_env(config: &RunConfig) -> Result<MedicineSortEnv> {
    let registry = default_registry()?;
    let mut env_config = config.env.clone();
    if let Some(spec) = registry.spec(ENV_ID) {
        env_config.max_episode_steps.get_or_insert(spec.max_episode_steps);
    }
    let env = MedicineSortEnv::with_task(env_config, config.task.clone())?;
    Ok(env)
}

fn item_poses(env: &MedicineSortEnv) -> Result<Vec<ItemPose>> {
    env.sorting()
        .items
        .iter()
        .map(|item| -> Result<ItemPose> {
            let pose = env.scene().pose(item.actor)?[0];
            Ok(ItemPose {
                category: item.category,
                pose,
            })
        })
        .collect()
}

/// Run the bounded rollout loop.
///
/// # Errors
///
/// Returns any error produced by the environment or while writing
/// trajectories.
pub fn run(config: &RunConfig, stop: &AtomicBool) -> Result<RunSummary> {
    let mut env = make_env(config)?;
    let camera = fixed_view_camera();
    env.add_camera(camera.clone());
    let log_every = config.log_every.max(1);
    let mut summary = RunSummary::default();

    tracing::info!(
        "Starting {} episodes of {} (num_envs = {}, max steps = {})",
        config.episodes,
        ENV_ID,
        env.num_envs(),
        config.max_steps_per_episode
    );

    for episode in 0..config.episodes {
        if stop.load(Ordering::Relaxed) {
            summary.interrupted = true;
            break;
        }
        let options = if episode == 0 {
            ResetOptions::reconfigure()
        } else {
            ResetOptions::default()
        };
        env.reset(options)?;

        let mut recorder = EpisodeRecorder::new(episode, camera.clone());
        let mut success = false;
        for step in 0..config.max_steps_per_episode {
            if stop.load(Ordering::Relaxed) {
                summary.interrupted = true;
                break;
            }
            let action = env.sample_action();
            let out = env.step(&action)?;
            let frames = env.render();
            recorder.record_step(&out, frames.len(), item_poses(&env)?);
            summary.total_steps += 1;

            if (step + 1) % log_every == 0 {
                tracing::info!(
                    "Episode {} step {} complete. Reward[0]: {:.4}",
                    episode,
                    step + 1,
                    out.reward.first().copied().unwrap_or_default()
                );
            }

            success = out.info.success.iter().all(|&s| s);
            if success {
                tracing::info!("Episode {} succeeded after {} steps", episode, step + 1);
                break;
            }
            if out.all_done() {
                tracing::debug!("Episode {} done after {} steps", episode, step + 1);
                break;
            }
        }

        recorder.set_success(success);
        if let Some(dir) = &config.output_dir {
            let path = recorder.write(dir)?;
            tracing::debug!("Wrote {}", path.display());
            summary.written.push(path);
        }
        summary.episodes_run += 1;
        if success {
            summary.successes += 1;
        }
        if summary.interrupted {
            break;
        }
    }

    if summary.interrupted {
        tracing::warn!("Run interrupted after {} episodes", summary.episodes_run);
    }
    tracing::info!(
        "Finished {} episodes, {} successful, {} steps",
        summary.episodes_run,
        summary.successes,
        summary.total_steps
    );
    Ok(summary)
}
