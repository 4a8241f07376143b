//! # MedSort Runner
//!
//! Plays random-action episodes of the medicine sorting task and records one
//! JSON trajectory per episode.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::Result;
use clap::Parser;
use medsort::app::{self, RunConfig};
use tasks::{EnvConfig, ObsMode, RenderMode, RewardMode};

#[derive(Parser, Debug)]
#[command(name = "medsort", about = "Roll out and record MedicineSortEnv-v1 episodes")]
struct Args {
    /// Number of episodes to play
    #[arg(long, default_value_t = 1)]
    episodes: u32,
    /// Step cap of the rollout loop per episode
    #[arg(long, default_value_t = 200)]
    max_steps: u32,
    /// Number of parallel environment instances
    #[arg(long, default_value_t = 1)]
    num_envs: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = ObsMode::State)]
    obs_mode: ObsMode,
    #[arg(long, default_value_t = RenderMode::Human)]
    render_mode: RenderMode,
    #[arg(long, default_value_t = RewardMode::NormalizedDense)]
    reward_mode: RewardMode,
    /// Directory receiving the episode trajectories
    #[arg(long, default_value = "medicine_sort")]
    output_dir: PathBuf,
    /// JSON file overriding the default task definition
    #[arg(long)]
    task_config: Option<PathBuf>,
    /// Do not write trajectories
    #[arg(long)]
    no_record: bool,
    /// Log progress every this many steps
    #[arg(long, default_value_t = 50)]
    log_every: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let task = match &args.task_config {
        Some(path) => app::load_task(path)?,
        None => tasks::medicine_sort::TaskConfig::default(),
    };
    let config = RunConfig {
        env: EnvConfig {
            obs_mode: args.obs_mode,
            render_mode: args.render_mode,
            reward_mode: args.reward_mode,
            num_envs: args.num_envs,
            seed: args.seed,
            ..EnvConfig::default()
        },
        task,
        episodes: args.episodes,
        max_steps_per_episode: args.max_steps,
        output_dir: (!args.no_record).then_some(args.output_dir),
        log_every: args.log_every,
    };

    let stop = AtomicBool::new(false);
    let summary = app::run(&config, &stop)?;
    for path in &summary.written {
        tracing::info!("Recorded {}", path.display());
    }
    Ok(())
}
