//! # Environment Configuration
//!
//! The options recognized when an environment is created. Every field has a
//! default, so a JSON document only needs to name what it overrides:
//!
//! ```json
//! { "num_envs": 16, "obs_mode": "state", "reward_mode": "dense" }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnvError;

/// Implements `FromStr` and `Display` over the snake_case names of a
/// fieldless enum.
macro_rules! string_enum {
    ($ty:ident, $option:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const VARIANTS: &'static str = concat!($($name, " "),+);

            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = EnvError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(EnvError::InvalidOption {
                        option: $option,
                        value: other.to_owned(),
                        expected: Self::VARIANTS,
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Robots a task may be instantiated with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotUid {
    #[default]
    Panda,
}

string_enum!(RobotUid, "robot_uids", { Panda => "panda" });

/// Observation representation returned by `reset` and `step`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObsMode {
    None,
    #[default]
    State,
}

string_enum!(ObsMode, "obs_mode", { None => "none", State => "state" });

/// How frames are produced by `render`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    None,
    Human,
    RgbArray,
}

string_enum!(RenderMode, "render_mode", {
    None => "none",
    Human => "human",
    RgbArray => "rgb_array",
});

/// Which reward signal `step` reports.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardMode {
    None,
    Sparse,
    Dense,
    #[default]
    NormalizedDense,
}

string_enum!(RewardMode, "reward_mode", {
    None => "none",
    Sparse => "sparse",
    Dense => "dense",
    NormalizedDense => "normalized_dense",
});

/// Creation-time options for an environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub robot_uids: RobotUid,
    pub obs_mode: ObsMode,
    pub render_mode: RenderMode,
    pub reward_mode: RewardMode,
    /// Number of parallel environment instances
    pub num_envs: usize,
    /// Physics steps per second
    pub sim_freq: u32,
    /// Control steps per second
    pub control_freq: u32,
    /// Overrides the step cap from the registry when set
    pub max_episode_steps: Option<u32>,
    /// Seed for the first reset when none is given in the reset options
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            robot_uids: RobotUid::Panda,
            obs_mode: ObsMode::State,
            render_mode: RenderMode::None,
            reward_mode: RewardMode::NormalizedDense,
            num_envs: 1,
            sim_freq: 100,
            control_freq: 20,
            max_episode_steps: None,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Json`] for malformed input and
    /// [`EnvError::InvalidConfig`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`EnvError::InvalidConfig`] when a value is out of range.
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.num_envs == 0 {
            return Err(EnvError::InvalidConfig("num_envs must be at least 1".into()));
        }
        if self.control_freq == 0 || self.sim_freq < self.control_freq {
            return Err(EnvError::InvalidConfig(format!(
                "sim_freq ({}) must be at least control_freq ({}) and control_freq positive",
                self.sim_freq, self.control_freq
            )));
        }
        if self.max_episode_steps == Some(0) {
            return Err(EnvError::InvalidConfig("max_episode_steps must be positive".into()));
        }
        Ok(())
    }

    /// Physics steps taken per call to `step`.
    #[must_use]
    pub fn sim_steps_per_control(&self) -> u32 {
        (self.sim_freq / self.control_freq.max(1)).max(1)
    }

    /// Duration of one physics step in seconds.
    #[must_use]
    pub fn sim_timestep(&self) -> f32 {
        1.0 / self.sim_freq.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_from_strings() {
        assert_eq!("state".parse::<ObsMode>().unwrap(), ObsMode::State);
        assert_eq!("rgb_array".parse::<RenderMode>().unwrap(), RenderMode::RgbArray);
        assert_eq!(
            "normalized_dense".parse::<RewardMode>().unwrap(),
            RewardMode::NormalizedDense
        );
        assert_eq!(RewardMode::Sparse.to_string(), "sparse");
    }

    #[test]
    fn unknown_robot_lists_choices() {
        let err = "fetch".parse::<RobotUid>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fetch"));
        assert!(msg.contains("panda"));
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config = EnvConfig::from_json(r#"{ "num_envs": 8, "render_mode": "human" }"#).unwrap();
        assert_eq!(config.num_envs, 8);
        assert_eq!(config.render_mode, RenderMode::Human);
        assert_eq!(config.obs_mode, ObsMode::State);
        assert_eq!(config.sim_steps_per_control(), 5);
    }

    #[test]
    fn zero_envs_is_invalid() {
        assert!(matches!(
            EnvConfig::from_json(r#"{ "num_envs": 0 }"#),
            Err(EnvError::InvalidConfig(_))
        ));
    }
}
