//! Static definition of the sorting task: item categories, their geometry and
//! color, the bin assigned to each category and the evaluation constants.

use std::fmt;

use physics::{Rgba, Shape};
use serde::{Deserialize, Serialize};

use crate::error::EnvError;

/// Medicine item class. Declaration order is the fixed enumeration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Pill,
    Bottle,
    Syringe,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Pill, Category::Bottle, Category::Syringe];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Pill => "pill",
            Category::Bottle => "bottle",
            Category::Syringe => "syringe",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry and color of one movable item.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub category: Category,
    pub shape: Shape,
    pub color: Rgba,
}

/// Fixed target bin of one category.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    pub category: Category,
    /// Bin center; only x and y take part in evaluation
    pub location: [f32; 3],
    pub half_size: [f32; 3],
}

impl BinSpec {
    #[must_use]
    pub fn xy(&self) -> [f32; 2] {
        [self.location[0], self.location[1]]
    }
}

/// Region items are dropped into at the start of every episode.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    /// Center of the sampling square in the table plane
    pub center: [f32; 2],
    /// Half width of the sampling square
    pub half_extent: f32,
    /// Height at which items rest on the table
    pub rest_height: f32,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            half_extent: 0.2,
            rest_height: 0.02,
        }
    }
}

/// Immutable description of a medicine sorting task.
///
/// `Default` reproduces the reference layout: a red pill capsule, a blue box
/// bottle and a green syringe cylinder, with bins lined up along `x = 0.3`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub items: Vec<ItemSpec>,
    pub bins: Vec<BinSpec>,
    pub spawn: SpawnRegion,
    /// Planar distance below which an item counts as placed
    pub success_threshold: f32,
    /// Steepness of the `1 - tanh(scale * d)` shaping term
    pub distance_scale: f32,
    /// Reward that replaces the shaping sum on success
    pub success_bonus: f32,
    /// Divisor of the normalized reward
    pub max_reward: f32,
}

const BIN_HALF_SIZE: [f32; 3] = [0.05, 0.05, 0.02];

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            items: vec![
                ItemSpec {
                    category: Category::Pill,
                    shape: Shape::capsule(0.01, 0.02),
                    color: Rgba::new(0.8, 0.2, 0.2, 1.0),
                },
                ItemSpec {
                    category: Category::Bottle,
                    shape: Shape::cuboid([0.02, 0.02, 0.04]),
                    color: Rgba::new(0.2, 0.2, 0.8, 1.0),
                },
                ItemSpec {
                    category: Category::Syringe,
                    shape: Shape::cylinder(0.01, 0.05),
                    color: Rgba::new(0.2, 0.8, 0.2, 1.0),
                },
            ],
            bins: vec![
                BinSpec {
                    category: Category::Pill,
                    location: [0.3, -0.2, 0.0],
                    half_size: BIN_HALF_SIZE,
                },
                BinSpec {
                    category: Category::Bottle,
                    location: [0.3, 0.0, 0.0],
                    half_size: BIN_HALF_SIZE,
                },
                BinSpec {
                    category: Category::Syringe,
                    location: [0.3, 0.2, 0.0],
                    half_size: BIN_HALF_SIZE,
                },
            ],
            spawn: SpawnRegion::default(),
            success_threshold: 0.05,
            distance_scale: 5.0,
            success_bonus: 10.0,
            max_reward: 10.0,
        }
    }
}

impl TaskConfig {
    /// Parse a task definition from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Json`] for malformed input and
    /// [`EnvError::InvalidTask`] when the definition breaks an invariant.
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let task: Self = serde_json::from_str(json)?;
        task.validate()?;
        Ok(task)
    }

    /// Check that items and bins pair up one-to-one by category and that the
    /// constants are usable.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::InvalidTask`] describing the first violation.
    pub fn validate(&self) -> Result<(), EnvError> {
        for category in Category::ALL {
            let items = self.items.iter().filter(|i| i.category == category).count();
            let bins = self.bins.iter().filter(|b| b.category == category).count();
            if items != 1 || bins != 1 {
                return Err(EnvError::InvalidTask(format!(
                    "category {category} needs exactly one item and one bin, found {items} and {bins}"
                )));
            }
        }
        if self.items.len() != Category::ALL.len() || self.bins.len() != Category::ALL.len() {
            return Err(EnvError::InvalidTask("unexpected extra items or bins".into()));
        }
        if self.success_threshold <= 0.0 || self.max_reward <= 0.0 || self.spawn.half_extent < 0.0 {
            return Err(EnvError::InvalidTask(
                "success_threshold and max_reward must be positive, spawn half_extent non-negative".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn item(&self, category: Category) -> Option<&ItemSpec> {
        self.items.iter().find(|i| i.category == category)
    }

    #[must_use]
    pub fn bin(&self, category: Category) -> Option<&BinSpec> {
        self.bins.iter().find(|b| b.category == category)
    }

    /// Planar bin center of `category`.
    #[must_use]
    pub fn bin_xy(&self, category: Category) -> Option<[f32; 2]> {
        self.bin(category).map(BinSpec::xy)
    }
}
