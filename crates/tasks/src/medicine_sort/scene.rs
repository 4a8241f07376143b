//! Scene population for the sorting task.

use physics::{ActorId, Pose, Rgba, Scene, TableScene, TableSceneBuilder, Vec3};
use tracing::debug;

use super::task::{Category, TaskConfig};
use crate::error::EnvError;

const BIN_COLOR: Rgba = Rgba::new(0.7, 0.7, 0.7, 1.0);

/// Actor handle tagged with the category it belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskEntity {
    pub category: Category,
    pub actor: ActorId,
}

/// Everything the populator added to the scene, items and bins in category
/// order.
#[derive(Clone, Debug)]
pub struct SortingScene {
    pub furniture: TableScene,
    pub items: Vec<TaskEntity>,
    pub bins: Vec<TaskEntity>,
}

/// Build the table, then one item and one static bin per category.
///
/// Performs no randomization: populating two fresh scenes yields the same
/// actors in the same order. Items start at the origin until the episode
/// initializer places them.
///
/// # Errors
///
/// Propagates actor construction errors and reports a category missing from
/// `task`.
pub fn populate(scene: &mut Scene, table: &TableSceneBuilder, task: &TaskConfig) -> Result<SortingScene, EnvError> {
    let furniture = table.build(scene)?;

    let mut items = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let spec = task
            .item(category)
            .ok_or_else(|| EnvError::InvalidTask(format!("no item for category {category}")))?;
        let mut builder = scene.create_actor_builder();
        builder
            .set_initial_pose(Pose::IDENTITY)
            .add_visual(spec.shape, spec.color)
            .add_collision(spec.shape);
        let actor = builder.build(scene, &format!("{category}_medicine"))?;
        items.push(TaskEntity { category, actor });
    }

    let mut bins = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let spec = task
            .bin(category)
            .ok_or_else(|| EnvError::InvalidTask(format!("no bin for category {category}")))?;
        let mut builder = scene.create_actor_builder();
        builder
            .add_box_visual(spec.half_size, BIN_COLOR)
            .add_box_collision(spec.half_size);
        let actor = builder.build_static(scene, &format!("{category}_bin"))?;
        scene.set_pose_all(actor, Pose::from_position(Vec3::from_array(spec.location)))?;
        bins.push(TaskEntity { category, actor });
    }

    debug!(
        "Populated scene with {} items and {} bins across {} envs",
        items.len(),
        bins.len(),
        scene.num_envs()
    );
    Ok(SortingScene { furniture, items, bins })
}
