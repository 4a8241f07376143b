//! Success evaluation.
//!
//! Evaluation is a pure function of the current pose snapshot. It keeps no
//! memory between steps, so success can flip back to false when an item is
//! knocked out of its bin.

use physics::Scene;

use super::scene::TaskEntity;
use super::task::TaskConfig;
use crate::error::EnvError;

/// Planar distance of one item to its bin in every environment instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDistances {
    pub item: TaskEntity,
    pub distances: Vec<f32>,
}

/// Outcome of evaluating the scene snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Per-instance success flag
    pub success: Vec<bool>,
    /// Per-item distances, in item order
    pub items: Vec<ItemDistances>,
}

impl Evaluation {
    /// Whether `item_index` is within the threshold in instance `env`.
    #[must_use]
    pub fn is_placed(&self, item_index: usize, env: usize, threshold: f32) -> bool {
        self.items
            .get(item_index)
            .and_then(|d| d.distances.get(env))
            .is_some_and(|&d| d < threshold)
    }
}

/// Planar (x, y) distance from every item to the bin of its own category.
///
/// # Errors
///
/// Fails when an item's category has no bin in `task` or its actor is not
/// part of `scene`.
pub fn item_distances(scene: &Scene, items: &[TaskEntity], task: &TaskConfig) -> Result<Vec<ItemDistances>, EnvError> {
    items
        .iter()
        .map(|&item| -> Result<ItemDistances, EnvError> {
            let bin = task
                .bin_xy(item.category)
                .ok_or_else(|| EnvError::InvalidTask(format!("no bin for category {}", item.category)))?;
            let distances = scene
                .pose(item.actor)?
                .iter()
                .map(|pose| pose.planar_distance(bin))
                .collect();
            Ok(ItemDistances { item, distances })
        })
        .collect()
}

/// Success flags from precomputed distances: an instance succeeds when every
/// item is strictly closer than `threshold` to its bin.
#[must_use]
pub fn success_from_distances(num_envs: usize, items: &[ItemDistances], threshold: f32) -> Vec<bool> {
    let mut success = vec![true; num_envs];
    for item in items {
        for (flag, &d) in success.iter_mut().zip(&item.distances) {
            *flag &= d < threshold;
        }
    }
    success
}

/// Evaluate the current snapshot.
///
/// # Errors
///
/// See [`item_distances`].
pub fn evaluate(scene: &Scene, items: &[TaskEntity], task: &TaskConfig) -> Result<Evaluation, EnvError> {
    let items = item_distances(scene, items, task)?;
    let success = success_from_distances(scene.num_envs(), &items, task.success_threshold);
    Ok(Evaluation { success, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medicine_sort::task::Category;
    use physics::ActorId;

    fn distances(category: Category, distances: Vec<f32>) -> ItemDistances {
        ItemDistances {
            item: TaskEntity {
                category,
                actor: ActorId(0),
            },
            distances,
        }
    }

    #[test]
    fn success_is_a_conjunction() {
        let items = vec![
            distances(Category::Pill, vec![0.0, 0.0, 0.01]),
            distances(Category::Bottle, vec![0.0, 0.05, 0.01]),
            distances(Category::Syringe, vec![0.049, 0.0, 0.2]),
        ];
        assert_eq!(success_from_distances(3, &items, 0.05), vec![true, false, false]);
    }

    #[test]
    fn threshold_is_strict() {
        let items = vec![distances(Category::Pill, vec![0.05])];
        assert_eq!(success_from_distances(1, &items, 0.05), vec![false]);
    }
}
