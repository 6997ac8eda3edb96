//! Error types for generation, configuration and navigation.

use glam::Vec2;
use thiserror::Error;

/// A configuration value that cannot produce a valid dungeon.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least 2x2 cross points, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32 },

    #[error("{width}x{height} cross points with room size {room_size} exceed the largest tile grid")]
    GridTooLarge {
        width: i32,
        height: i32,
        room_size: i32,
    },

    #[error("room size must be at least {min}, got {room_size}")]
    RoomTooSmall { room_size: i32, min: i32 },

    #[error("minimum walk length must be at least 1, got {0}")]
    WalkTooShort(u32),

    #[error("walk length range is empty: min {min} > max {max}")]
    WalkRange { min: u32, max: u32 },

    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("unit spawn chances add up to {0}, which exceeds 1")]
    SpawnChanceSum(f64),

    #[error("obstacle size range is invalid: {min}..{max}")]
    ObstacleSize { min: f32, max: f32 },
}

/// Failure of a generation request or of reading/writing its configuration.
#[derive(Error, Debug)]
pub enum DungeonError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Navigation query failure.
///
/// `Unreachable` can only happen when the graph is not a single connected
/// component, which the generator never produces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error("navigation graph has no waypoints")]
    EmptyGraph,

    #[error("no route from {from} to {to}")]
    Unreachable { from: Vec2, to: Vec2 },
}
