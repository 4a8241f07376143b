//! Tabletop furniture shared by manipulation tasks.
//!
//! The table top surface sits at `z = 0`, so objects resting on it have a
//! positive height equal to their half extent.

use glam::Vec3;
use tracing::debug;

use crate::error::PhysicsError;
use crate::types::{ActorId, Pose, Rgba};
use crate::Scene;

/// Configuration for the table scene
#[derive(Clone, Debug)]
pub struct TableConfig {
    /// Table top half extents (x, y, z)
    pub half_size: [f32; 3],
    /// Offset of the table center from the world origin in the x-y plane
    pub offset: [f32; 2],
    /// Height of the table top surface above the ground
    pub height: f32,
    pub color: Rgba,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            half_size: [0.6, 0.9, 0.02],
            offset: [-0.12, 0.0],
            height: 0.919_642_9,
            color: Rgba::new(0.6, 0.45, 0.3, 1.0),
        }
    }
}

/// Handles of the furniture actors built by [`TableSceneBuilder`].
#[derive(Copy, Clone, Debug)]
pub struct TableScene {
    pub table: ActorId,
    pub ground: ActorId,
}

/// Builds a table with its surface at the origin and a ground plane below it.
#[derive(Clone, Debug, Default)]
pub struct TableSceneBuilder {
    pub config: TableConfig,
}

impl TableSceneBuilder {
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    fn table_pose(&self) -> Pose {
        let [ox, oy] = self.config.offset;
        Pose::from_position(Vec3::new(ox, oy, -self.config.half_size[2]))
    }

    fn ground_pose(&self) -> Pose {
        Pose::from_position(Vec3::new(0.0, 0.0, -self.config.height - 0.01))
    }

    /// Add the table and the ground to `scene`.
    ///
    /// # Errors
    ///
    /// Propagates actor construction errors from the scene.
    pub fn build(&self, scene: &mut Scene) -> Result<TableScene, PhysicsError> {
        let mut builder = scene.create_actor_builder();
        builder
            .set_initial_pose(self.table_pose())
            .add_box_visual(self.config.half_size, self.config.color)
            .add_box_collision(self.config.half_size);
        let table = builder.build_static(scene, "table-workspace")?;

        let mut builder = scene.create_actor_builder();
        builder
            .set_initial_pose(self.ground_pose())
            .add_box_visual([10.0, 10.0, 0.01], Rgba::new(0.5, 0.5, 0.5, 1.0))
            .add_box_collision([10.0, 10.0, 0.01]);
        let ground = builder.build_static(scene, "ground")?;

        debug!("Table scene built with {} environments", scene.num_envs());
        Ok(TableScene { table, ground })
    }

    /// Restore furniture poses in the listed environment instances.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range environment indices.
    pub fn initialize(&self, scene: &mut Scene, furniture: &TableScene, env_idx: &[usize]) -> Result<(), PhysicsError> {
        scene.set_pose(furniture.table, env_idx, &[self.table_pose()])?;
        scene.set_pose(furniture.ground, env_idx, &[self.ground_pose()])
    }
}
