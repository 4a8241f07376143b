use physics::PhysicsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("action has {got} values, expected {expected} ({num_envs} envs x {action_size}) or {action_size}")]
    ActionShape {
        expected: usize,
        got: usize,
        num_envs: usize,
        action_size: usize,
    },
    #[error("environment index {index} out of range for {num_envs} environments")]
    EnvIndexOutOfRange { index: usize, num_envs: usize },
    #[error("environment {0:?} is not registered")]
    UnknownEnv(String),
    #[error("environment {0:?} is already registered")]
    DuplicateEnv(String),
    #[error("malformed environment id {0:?}, expected Name-vN")]
    MalformedId(String),
    #[error("robot {0:?} is not supported by this task")]
    UnsupportedRobot(String),
    #[error("invalid {option} {value:?}, expected one of: {expected}")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("invalid task configuration: {0}")]
    InvalidTask(String),
    #[error("invalid environment configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}
