//! Wall placement: one static blocking entity per blocked tile.

use hecs::{Entity, World};

use crate::components::{BlocksMovement, Collider, Position, Wall};
use crate::grid::Grid;

/// Half of a tile, the footprint of a wall entity
const WALL_RADIUS: f32 = 0.5;

/// Spawn a wall on every blocked tile of `grid`.
pub fn place_walls(world: &mut World, grid: &Grid) -> Vec<Entity> {
    puffin::profile_function!();

    let walls: Vec<Entity> = grid
        .blocked_tiles()
        .map(|tile| {
            world.spawn((
                Position(tile.as_vec2()),
                Collider::new(WALL_RADIUS),
                Wall,
                BlocksMovement,
            ))
        })
        .collect();

    log::debug!("placed {} walls", walls.len());
    walls
}
