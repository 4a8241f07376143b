use thiserror::Error;

use crate::types::ActorId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("unknown actor {0:?}")]
    UnknownActor(ActorId),
    #[error("actor builder for {0:?} has no collision or visual shapes")]
    EmptyBuilder(String),
    #[error("static actor {0:?} cannot be moved per environment")]
    StaticActor(String),
    #[error("expected {expected} poses, got {got}")]
    PoseCountMismatch { expected: usize, got: usize },
    #[error("environment index {index} out of range for {num_envs} environments")]
    EnvIndexOutOfRange { index: usize, num_envs: usize },
    #[error("scene must contain at least one environment")]
    NoEnvironments,
}
