//! A playable level: the generated dungeon plus the entities living in it.

use hecs::{Entity, World};
use rand::Rng;

use crate::config::LevelConfig;
use crate::dungeon::{self, Dungeon};
use crate::error::DungeonError;
use crate::spawning::{spawn_obstacles, spawn_units, SpawnReport};
use crate::walls::place_walls;

pub struct Level {
    pub dungeon: Dungeon,
    pub world: World,
    pub walls: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub units: SpawnReport,
}

impl Level {
    /// Generate a dungeon and populate a fresh world for it.
    ///
    /// Regenerating means calling this again and dropping the old level;
    /// nothing carries over between levels.
    pub fn generate(config: &LevelConfig, rng: &mut impl Rng) -> Result<Self, DungeonError> {
        puffin::profile_function!();
        config.validate()?;

        let dungeon = dungeon::generate(&config.dungeon, rng)?;
        let mut world = World::new();
        let walls = place_walls(&mut world, &dungeon.grid);
        let obstacles = spawn_obstacles(&mut world, &dungeon, &config.obstacles, rng);
        let units = spawn_units(&mut world, &dungeon, &config.units, rng);

        Ok(Self {
            dungeon,
            world,
            walls,
            obstacles,
            units,
        })
    }

    /// Targets still needed to clear the level.
    pub fn target_count(&self) -> usize {
        self.units.targets
    }
}
