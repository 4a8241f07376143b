//! # MedSort
//!
//! Runner for the medicine sorting environment.
//!
//! The crate drives [`tasks::medicine_sort::MedicineSortEnv`] with randomly
//! sampled actions for a fixed number of episodes, rendering through a fixed
//! overview camera and writing one JSON trajectory per episode.
//!
//! -   [`app`]: the bounded episode loop. An episode stops at the step cap,
//!     when every instance reports success, when every instance is done, or
//!     when the caller raises the stop flag.
//! -   [`record`]: per-episode trajectory recording.
//!
//! The `medsort` binary wraps [`app::run`] in a command line interface.

pub mod app;
pub mod record;

pub use physics;
pub use tasks;
