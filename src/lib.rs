//! Cyclic dungeon generation.
//!
//! A random walk over a coarse cell grid decides which cross points become
//! rooms and which boundaries become corridors. The result is expanded into
//! a tile grid with eroded room edges, a waypoint navigation graph that
//! agents route over, and wall entities in a `hecs::World`.
//!
//! ```no_run
//! use cycle_dungeon::{DungeonConfig, DungeonGenerator};
//!
//! let mut generator = DungeonGenerator::from_seed(DungeonConfig::default(), 7);
//! let dungeon = generator.generate()?;
//! let first = dungeon.graph.waypoints().point(dungeon.rooms[0]);
//! let last = dungeon.graph.waypoints().point(dungeon.rooms[dungeon.rooms.len() - 1]);
//! let path = dungeon.find_path(first, last)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod agent;
pub mod components;
pub mod config;
pub mod constants;
pub mod corridor;
pub mod cycle;
pub mod dungeon;
pub mod error;
pub mod grid;
pub mod layout;
pub mod level;
pub mod navgraph;
pub mod pathfinding;
pub mod polish;
pub mod raster;
pub mod spawning;
pub mod tile;
pub mod trace;
pub mod walls;
pub mod waypoint;

pub use config::{DungeonConfig, LevelConfig, ObstacleConfig, UnitSpawnConfig};
pub use dungeon::{generate, Dungeon, DungeonGenerator};
pub use error::{ConfigError, DungeonError, NavError};
pub use grid::Grid;
pub use level::Level;
pub use navgraph::NavGraph;
pub use pathfinding::{find_path, Path, PathStep};
pub use waypoint::{WaypointId, WaypointKind};
