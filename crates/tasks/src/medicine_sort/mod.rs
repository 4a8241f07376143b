//! # Medicine Sorting Task
//!
//! A robot sorts three medicine items (pill, bottle, syringe) into the bin of
//! matching category on a tabletop.
//!
//! The episode lifecycle is split leaf-first:
//!
//! -   [`task`]: the immutable [`TaskConfig`] with item geometry, bin
//!     locations and evaluation constants.
//! -   [`scene`]: [`populate`] builds one item and one static bin per
//!     [`Category`], tagging every handle with its category.
//! -   [`episode`]: [`initialize_items`] samples a fresh resting pose per item
//!     and instance.
//! -   [`evaluate`](mod@evaluate): per-instance success, true when every item is
//!     within the threshold of its own bin.
//! -   [`reward`]: dense `1 - tanh` shaping, replaced by a bonus on success.
//!
//! [`MedicineSortEnv`] wires these into the batched [`crate::Env`] interface.

pub mod env;
pub mod episode;
pub mod evaluate;
pub mod reward;
pub mod scene;
pub mod task;

pub use env::{MedicineSortEnv, ENV_ID, MAX_EPISODE_STEPS, SUPPORTED_ROBOTS};
pub use episode::{initialize_items, sample_pose};
pub use evaluate::{evaluate, Evaluation, ItemDistances};
pub use reward::{compute_reward, dense_reward, normalized_dense_reward, shaping_term, sparse_reward};
pub use scene::{populate, SortingScene, TaskEntity};
pub use task::{BinSpec, Category, ItemSpec, SpawnRegion, TaskConfig};

use crate::env::Env;
use crate::error::EnvError;
use crate::registry::{EnvSpec, Registry};

/// Register the task under [`ENV_ID`] with a step cap of
/// [`MAX_EPISODE_STEPS`].
///
/// # Errors
///
/// Returns [`EnvError::DuplicateEnv`] if the id is already taken.
pub fn register(registry: &mut Registry) -> Result<(), EnvError> {
    registry.register(EnvSpec::new(ENV_ID, MAX_EPISODE_STEPS)?, |config| {
        let env: Box<dyn Env> = Box::new(MedicineSortEnv::new(config)?);
        Ok(env)
    })
}
