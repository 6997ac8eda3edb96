//! Dungeon generation constants.

/// Value added to each neighbour of a room cross point after the walk.
/// Two adjacent rooms together reach `CYCLE_FULL_EDGE`.
pub const CYCLE_HALF_EDGE: i32 = 5;
/// Intersection value marking a corridor between two rooms
pub const CYCLE_FULL_EDGE: i32 = 2 * CYCLE_HALF_EDGE;
/// Bias written on a cell boundary crossed by the walk, so it never closes into a corridor
pub const CYCLE_WALKED_EDGE_BIAS: i32 = -10;

/// Chance for a walkable tile in a polish window to spill into its 8 neighbours
pub const POLISH_EXPAND_CHANCE: f64 = 0.2;

/// Smallest room size that keeps corridor stubs apart from the room centre
pub const MIN_ROOM_SIZE: i32 = 3;

/// Default number of cross points along x
pub const DUNGEON_DEFAULT_WIDTH: i32 = 5;
/// Default number of cross points along y
pub const DUNGEON_DEFAULT_HEIGHT: i32 = 5;
/// Default side length of a room block, in tiles
pub const DUNGEON_DEFAULT_ROOM_SIZE: i32 = 5;
/// Default shortest random walk
pub const DUNGEON_DEFAULT_MIN_WALK: u32 = 5;
/// Default longest random walk
pub const DUNGEON_DEFAULT_MAX_WALK: u32 = 12;
/// Default chance of a side room next to each walk step
pub const DUNGEON_DEFAULT_MINOR_ROOM_CHANCE: f64 = 0.3;
