//! Expansion of the classified intersection grid into the full tile map.

use glam::IVec2;

use crate::grid::Grid;
use crate::layout::{is_vertical_corridor, Layout};
use crate::tile::TileType;
use crate::trace::{CoarseCell, CoarseMap};

/// Room slots become solid floor blocks, corridor slots a single centre line
/// along their axis. The wrap margin and empty slots stay blocked.
pub fn rasterize(map: &CoarseMap, layout: &Layout) -> Grid {
    puffin::profile_function!();

    let (width, height) = layout.tile_dimensions(map.width, map.height);
    let mut grid = Grid::new(width, height);
    let wrap = layout.wrap_width;

    for x in wrap..width as i32 - wrap {
        for y in wrap..height as i32 - wrap {
            let tile = IVec2::new(x, y);
            let slot = layout.slot_of(tile);
            match map.get(slot) {
                CoarseCell::Room => grid.set(x, y, TileType::Floor),
                CoarseCell::Corridor => {
                    let offset = layout.offset_in_block(tile);
                    let on_line = if is_vertical_corridor(slot) {
                        offset.x == layout.middle
                    } else {
                        offset.y == layout.middle
                    };
                    if on_line {
                        grid.set(x, y, TileType::Corridor);
                    }
                }
                CoarseCell::Empty => {}
            }
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::build_cycle;
    use crate::trace::trace_edges;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_cell(room_size: i32) -> (Grid, Layout) {
        let layout = Layout::new(room_size);
        let walk = build_cycle(2, 2, 1, 0.0, &mut StdRng::seed_from_u64(0));
        let traced = trace_edges(&walk.intersections, &layout);
        (rasterize(&traced.map, &layout), layout)
    }

    #[test]
    fn test_dimensions_include_margin() {
        let (grid, _) = single_cell(5);
        assert_eq!((grid.width, grid.height), (21, 21));
    }

    #[test]
    fn test_room_blocks_are_floor() {
        let (grid, layout) = single_cell(5);
        let origin = layout.block_origin(IVec2::new(2, 2));
        for dx in 0..5 {
            for dy in 0..5 {
                let tile = grid.get(origin.x + dx, origin.y + dy).unwrap();
                assert_eq!(tile.tile_type, TileType::Floor);
            }
        }
    }

    #[test]
    fn test_corridors_are_one_tile_wide() {
        let (grid, layout) = single_cell(5);
        // horizontal corridor slot (1, 0)
        let origin = layout.block_origin(IVec2::new(1, 0));
        for dx in 0..5 {
            for dy in 0..5 {
                let walkable = grid.is_walkable(origin.x + dx, origin.y + dy);
                assert_eq!(walkable, dy == layout.middle, "offset ({dx}, {dy})");
            }
        }
        // vertical corridor slot (0, 1)
        let origin = layout.block_origin(IVec2::new(0, 1));
        for dx in 0..5 {
            for dy in 0..5 {
                let walkable = grid.is_walkable(origin.x + dx, origin.y + dy);
                assert_eq!(walkable, dx == layout.middle);
            }
        }
    }

    #[test]
    fn test_empty_centre_and_margin_blocked() {
        let (grid, layout) = single_cell(5);
        let origin = layout.block_origin(IVec2::new(1, 1));
        for dx in 0..5 {
            for dy in 0..5 {
                assert!(!grid.is_walkable(origin.x + dx, origin.y + dy));
            }
        }
        for i in 0..grid.width as i32 {
            for m in 0..layout.wrap_width {
                assert!(!grid.is_walkable(i, m));
                assert!(!grid.is_walkable(m, i));
                assert!(!grid.is_walkable(i, grid.height as i32 - 1 - m));
                assert!(!grid.is_walkable(grid.width as i32 - 1 - m, i));
            }
        }
    }
}
