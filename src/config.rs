//! Caller-supplied generation settings.
//!
//! Every struct here deserializes with defaults for missing fields, so a
//! config file only needs to name the values it changes.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, DungeonError};

/// Shape of one dungeon generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Cross points along x; the walk grid is one cell narrower
    pub width: i32,
    /// Cross points along y; the walk grid is one cell shorter
    pub height: i32,
    /// Side length of one room block, in tiles
    pub room_size: i32,
    pub min_walk_len: u32,
    pub max_walk_len: u32,
    /// Chance that a walk step also opens a side room
    pub minor_room_chance: f64,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DUNGEON_DEFAULT_WIDTH,
            height: DUNGEON_DEFAULT_HEIGHT,
            room_size: DUNGEON_DEFAULT_ROOM_SIZE,
            min_walk_len: DUNGEON_DEFAULT_MIN_WALK,
            max_walk_len: DUNGEON_DEFAULT_MAX_WALK,
            minor_room_chance: DUNGEON_DEFAULT_MINOR_ROOM_CHANCE,
        }
    }
}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.room_size < MIN_ROOM_SIZE {
            return Err(ConfigError::RoomTooSmall {
                room_size: self.room_size,
                min: MIN_ROOM_SIZE,
            });
        }
        let width = tile_extent(self.width, self.room_size);
        let height = tile_extent(self.height, self.room_size);
        let area = width.zip(height).and_then(|(w, h)| w.checked_mul(h));
        if area.is_none() {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                room_size: self.room_size,
            });
        }
        if self.min_walk_len < 1 {
            return Err(ConfigError::WalkTooShort(self.min_walk_len));
        }
        if self.min_walk_len > self.max_walk_len {
            return Err(ConfigError::WalkRange {
                min: self.min_walk_len,
                max: self.max_walk_len,
            });
        }
        check_probability("minor_room_chance", self.minor_room_chance)
    }

    /// Draw the walk length for one generation, uniform over the inclusive range.
    pub fn sample_walk_len(&self, rng: &mut impl Rng) -> u32 {
        rng.gen_range(self.min_walk_len..=self.max_walk_len)
    }
}

/// Obstacles scattered inside rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub size_min: f32,
    pub size_max: f32,
    pub max_per_room: usize,
    /// Free space kept between obstacles
    pub spacing: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            size_min: OBSTACLE_DEFAULT_SIZE_MIN,
            size_max: OBSTACLE_DEFAULT_SIZE_MAX,
            max_per_room: OBSTACLE_DEFAULT_MAX_PER_ROOM,
            spacing: OBSTACLE_DEFAULT_SPACING,
        }
    }
}

impl ObstacleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size_min > 0.0 && self.size_min <= self.size_max) {
            return Err(ConfigError::ObstacleSize {
                min: self.size_min,
                max: self.size_max,
            });
        }
        Ok(())
    }
}

/// Chances of each unit kind for rooms past the fixed player/guard slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSpawnConfig {
    pub guard_chance: f64,
    pub overseer_chance: f64,
    pub target_chance: f64,
}

impl Default for UnitSpawnConfig {
    fn default() -> Self {
        Self {
            guard_chance: GUARD_DEFAULT_SPAWN_CHANCE,
            overseer_chance: OVERSEER_DEFAULT_SPAWN_CHANCE,
            target_chance: TARGET_DEFAULT_SPAWN_CHANCE,
        }
    }
}

impl UnitSpawnConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("guard_chance", self.guard_chance)?;
        check_probability("overseer_chance", self.overseer_chance)?;
        check_probability("target_chance", self.target_chance)?;
        let sum = self.guard_chance + self.overseer_chance + self.target_chance;
        if sum > 1.0 + f64::EPSILON {
            return Err(ConfigError::SpawnChanceSum(sum));
        }
        Ok(())
    }
}

/// Everything a full level generation needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub dungeon: DungeonConfig,
    pub obstacles: ObstacleConfig,
    pub units: UnitSpawnConfig,
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dungeon.validate()?;
        self.obstacles.validate()?;
        self.units.validate()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DungeonError> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_json_file(&self, path: &Path) -> Result<(), DungeonError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Tiles along one axis for `cross_points` cross points, margin included.
/// `None` when the size does not fit in an `i32`.
fn tile_extent(cross_points: i32, room_size: i32) -> Option<i32> {
    let slots = cross_points.checked_mul(2)?.checked_sub(1)?;
    let wrap = room_size.checked_add(1)? / 2;
    slots.checked_mul(room_size)?.checked_add(wrap.checked_mul(2)?)
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}
