#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Task Environments
//!
//! Batched reinforcement learning environments on top of the [`physics`]
//! scene layer.
//!
//! -   [`Env`] is the Gym-style interface: `reset` and `step` operate on all
//!     parallel instances at once and return per-instance vectors.
//! -   [`EnvConfig`] is the creation-time configuration surface
//!     (`robot_uids`, `obs_mode`, `render_mode`, `reward_mode`, `num_envs`).
//! -   [`Registry`] creates environments from versioned ids; the
//!     [`default_registry`] contains every task in this crate.
//! -   [`medicine_sort`] is the medicine sorting task.
//!
//! ```rust
//! use tasks::{default_registry, Env, EnvConfig, ResetOptions};
//!
//! let registry = default_registry()?;
//! let config = EnvConfig { num_envs: 2, seed: Some(0), ..EnvConfig::default() };
//! let mut env = registry.make("MedicineSortEnv-v1", config)?;
//! let (_obs, info) = env.reset(ResetOptions::reconfigure())?;
//! assert_eq!(info.success.len(), 2);
//!
//! let action = env.sample_action();
//! let out = env.step(&action)?;
//! assert_eq!(out.reward.len(), 2);
//! # Ok::<(), tasks::EnvError>(())
//! ```

pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod medicine_sort;
pub mod registry;

pub use agent::Agent;
pub use config::{EnvConfig, ObsMode, RenderMode, RewardMode, RobotUid};
pub use env::{Env, Frame, Observation, ResetOptions, StepInfo, StepOutput, SUCCESS_KEY};
pub use error::EnvError;
pub use registry::{EnvSpec, Registry};

/// Registry with every environment defined in this crate.
///
/// # Errors
///
/// Fails only if two built-in environments share an id.
pub fn default_registry() -> Result<Registry, EnvError> {
    let mut registry = Registry::new();
    medicine_sort::register(&mut registry)?;
    Ok(registry)
}
