//! Obstacle and unit placement constants.

/// Placement attempts for an optional obstacle or unit before it is skipped
pub const PLACEMENT_ATTEMPTS: usize = 10;
/// Placement attempts for the player, the first guard and the last target
pub const MANDATORY_PLACEMENT_ATTEMPTS: usize = 1000;
/// Clearance kept between an obstacle and its room centre, on top of its half size
pub const OBSTACLE_CENTER_CLEARANCE: f32 = 0.4;
/// Unit collision radius
pub const UNIT_RADIUS: f32 = 0.35;

pub const OBSTACLE_DEFAULT_SIZE_MIN: f32 = 0.5;
pub const OBSTACLE_DEFAULT_SIZE_MAX: f32 = 0.8;
pub const OBSTACLE_DEFAULT_MAX_PER_ROOM: usize = 4;
pub const OBSTACLE_DEFAULT_SPACING: f32 = 1.0;

pub const GUARD_DEFAULT_SPAWN_CHANCE: f64 = 0.55;
pub const OVERSEER_DEFAULT_SPAWN_CHANCE: f64 = 0.15;
pub const TARGET_DEFAULT_SPAWN_CHANCE: f64 = 0.1;
