#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # Physics Scene Layer
//!
//! A small batched rigid-body scene used by the task environments. It plays
//! the role of the simulation engine: it creates actors, stores their pose in
//! every parallel environment instance, steps the simulation and describes
//! cameras for the renderer.
//!
//! ## Key Components
//!
//! -   **Actors:** [`ActorBuilder`] collects visual and collision
//!     [`Shape`]s and inserts a dynamic or static actor into a [`Scene`].
//!     Every actor is replicated once per environment instance.
//! -   **Scene:** [`Scene`] owns the per-instance [`Pose`] arrays. Poses are
//!     written by `set_pose` at reset time and by the integrator on `step`.
//! -   **Furniture:** [`TableSceneBuilder`] adds the table and ground shared
//!     by tabletop tasks.
//! -   **Cameras:** [`CameraSpec`] describes a pinhole camera for rendering.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{Pose, Rgba, Scene, Vec3};
//!
//! let mut scene = Scene::new(4)?;
//! let mut builder = scene.create_actor_builder();
//! builder.add_box_visual([0.02, 0.02, 0.04], Rgba::WHITE);
//! builder.add_box_collision([0.02, 0.02, 0.04]);
//! let cube = builder.build(&mut scene, "cube")?;
//!
//! scene.set_pose(cube, &[0, 2], &[Pose::from_position(Vec3::new(0.1, 0.0, 0.04))])?;
//! scene.step(0.01);
//! assert_eq!(scene.pose(cube)?.len(), 4);
//! # Ok::<(), physics::PhysicsError>(())
//! ```

pub mod builder;
pub mod camera;
pub mod error;
pub mod integrator;
pub mod scene;
pub mod shapes;
pub mod table;
pub mod transform;
pub mod types;

pub use builder::{ActorBuilder, VisualShape};
pub use camera::CameraSpec;
pub use error::PhysicsError;
pub use scene::{Actor, Scene};
pub use shapes::Shape;
pub use table::{TableConfig, TableScene, TableSceneBuilder};
pub use types::{ActorId, BodyType, Pose, Rgba};

pub use glam::{Quat, Vec3};
