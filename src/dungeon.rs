//! Generation entry point.
//!
//! `generate` runs the whole pipeline into fresh structures:
//!
//! 1. random walk over the coarse grid (`cycle`)
//! 2. classification and room graph (`trace`)
//! 3. corridor links (`corridor`)
//! 4. tile expansion (`raster`)
//! 5. boundary erosion (`polish`)
//!
//! Nothing from a previous generation is reused. Callers replace their old
//! `Dungeon` with the returned one.

use glam::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::corridor::connect_corridors;
use crate::cycle::build_cycle;
use crate::error::{DungeonError, NavError};
use crate::grid::Grid;
use crate::layout::Layout;
use crate::navgraph::NavGraph;
use crate::pathfinding::{self, Path};
use crate::polish::polish;
use crate::raster::rasterize;
use crate::trace::{trace_edges, CoarseMap};
use crate::waypoint::WaypointId;

/// Result of one generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub layout: Layout,
    /// Walkability surface, authoritative for movement
    pub grid: Grid,
    /// Classified intersection grid the tiles were expanded from
    pub coarse: CoarseMap,
    /// Every waypoint (room centres, stubs, corridor ends) and their links
    pub graph: NavGraph,
    /// Room centres in shuffled order, the unit of destination picking
    pub rooms: Vec<WaypointId>,
    /// Walk length drawn for this generation
    pub walk_len: u32,
    /// Coarse cells visited by the walk, side rooms included
    pub visited_cells: usize,
}

impl Dungeon {
    pub fn room_positions(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.rooms.iter().map(|&id| self.graph.waypoints().position(id))
    }

    /// Nearest waypoint of the full graph.
    pub fn nearest_waypoint(&self, position: Vec2) -> Option<WaypointId> {
        pathfinding::nearest_waypoint(self.graph.waypoints().iter(), position)
    }

    /// Nearest room centre.
    pub fn nearest_room(&self, position: Vec2) -> Option<WaypointId> {
        let rooms = self
            .rooms
            .iter()
            .map(|&id| (id, self.graph.waypoints().position(id)));
        pathfinding::nearest_waypoint(rooms, position)
    }

    pub fn find_path(&self, from: Vec2, to: Vec2) -> Result<Path, NavError> {
        pathfinding::find_path(&self.graph, from, to)
    }

    /// Restore lookup indices after deserialization.
    pub fn reindex(&mut self) {
        self.graph.reindex();
    }
}

/// Build a dungeon from `config`, drawing every random choice from `rng`.
pub fn generate(config: &DungeonConfig, rng: &mut impl Rng) -> Result<Dungeon, DungeonError> {
    puffin::profile_function!();
    config.validate()?;

    let layout = Layout::new(config.room_size);
    let walk_len = config.sample_walk_len(rng);
    let walk = build_cycle(config.width, config.height, walk_len, config.minor_room_chance, rng);
    log::debug!(
        "walk of length {walk_len} took {} steps and visited {} cells",
        walk.steps,
        walk.visited_cells
    );

    let mut traced = trace_edges(&walk.intersections, &layout);
    connect_corridors(&traced.map, &layout, &mut traced.graph);
    traced.rooms.shuffle(rng);

    let mut grid = rasterize(&traced.map, &layout);
    let centers: Vec<IVec2> = traced
        .rooms
        .iter()
        .map(|&id| traced.graph.waypoints().position(id))
        .collect();
    polish(&mut grid, &centers, &layout, rng);

    log::info!(
        "generated {}x{} dungeon: {} rooms, {} waypoints, {} edges",
        grid.width,
        grid.height,
        traced.rooms.len(),
        traced.graph.len(),
        traced.graph.edge_count()
    );

    Ok(Dungeon {
        layout,
        grid,
        coarse: traced.map,
        graph: traced.graph,
        rooms: traced.rooms,
        walk_len,
        visited_cells: walk.visited_cells,
    })
}

/// Generation context: the configuration plus the RNG every stage draws from.
pub struct DungeonGenerator {
    config: DungeonConfig,
    rng: StdRng,
}

impl DungeonGenerator {
    pub fn new(config: DungeonConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    /// Reproducible generator: same seed and config, same dungeons in sequence.
    pub fn from_seed(config: DungeonConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn generate(&mut self) -> Result<Dungeon, DungeonError> {
        generate(&self.config, &mut self.rng)
    }
}
