//! Boundary polisher: erodes rectangular room edges into irregular shapes.

use glam::IVec2;
use rand::Rng;

use crate::constants::POLISH_EXPAND_CHANCE;
use crate::grid::Grid;
use crate::layout::Layout;
use crate::tile::TileType;

/// Run every polish pass over the rooms centred at `room_centers`, in order.
///
/// Each pass reads a snapshot and writes the live grid, so floor spreads at
/// most one ring per pass. Writes stay inside the polishing room's window
/// and outside the wrap margin. Returns the number of walls carved.
pub fn polish(grid: &mut Grid, room_centers: &[IVec2], layout: &Layout, rng: &mut impl Rng) -> usize {
    puffin::profile_function!();

    let reach = layout.polish_half_width();
    let wrap = layout.wrap_width;
    let interior_min = IVec2::splat(wrap);
    let interior_max = IVec2::new(grid.width as i32 - 1 - wrap, grid.height as i32 - 1 - wrap);
    let mut carved = 0;

    for pass in 0..layout.polish_passes() {
        puffin::profile_scope!("polish_pass");
        let snapshot = grid.clone();
        let before = carved;

        for &center in room_centers {
            let window_min = (center - IVec2::splat(reach)).max(interior_min);
            let window_max = (center + IVec2::splat(reach)).min(interior_max);

            for x in center.x - reach..=center.x + reach {
                for y in center.y - reach..=center.y + reach {
                    if !snapshot.is_walkable(x, y) || !rng.gen_bool(POLISH_EXPAND_CHANCE) {
                        continue;
                    }
                    for dx in -1..=1 {
                        for dy in -1..=1 {
                            let pos = IVec2::new(x + dx, y + dy);
                            if pos.cmplt(window_min).any() || pos.cmpgt(window_max).any() {
                                continue;
                            }
                            if let Some(tile) = grid.get_mut(pos.x, pos.y) {
                                if tile.tile_type == TileType::Wall {
                                    tile.tile_type = TileType::Floor;
                                    tile.polished = true;
                                    carved += 1;
                                }
                            }
                        }
                    }
                }
            }
        }

        log::trace!("polish pass {pass} carved {} tiles", carved - before);
    }

    log::debug!("polished {} rooms, carved {carved} tiles", room_centers.len());
    carved
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// One 5x5 room in the middle of an otherwise blocked map.
    fn lone_room() -> (Grid, Layout, IVec2) {
        let layout = Layout::new(5);
        let mut grid = Grid::new(31, 31);
        let center = IVec2::new(15, 15);
        for x in 13..=17 {
            for y in 13..=17 {
                grid.set(x, y, TileType::Floor);
            }
        }
        (grid, layout, center)
    }

    #[test]
    fn test_polish_only_adds_floor() {
        let (mut grid, layout, center) = lone_room();
        let before = grid.clone();
        let carved = polish(&mut grid, &[center], &layout, &mut StdRng::seed_from_u64(8));

        for (old, new) in before.tiles.iter().zip(&grid.tiles) {
            if old.is_walkable() {
                assert_eq!(old, new);
            }
        }
        assert_eq!(grid.walkable_count(), before.walkable_count() + carved);
        assert!(carved > 0);
    }

    #[test]
    fn test_polish_stays_in_window() {
        let (mut grid, layout, center) = lone_room();
        polish(&mut grid, &[center], &layout, &mut StdRng::seed_from_u64(17));
        let reach = layout.polish_half_width();
        for y in 0..grid.height as i32 {
            for x in 0..grid.width as i32 {
                let d = (IVec2::new(x, y) - center).abs().max_element();
                if d > reach {
                    assert!(!grid.is_walkable(x, y), "({x}, {y}) escaped the window");
                }
            }
        }
    }

    #[test]
    fn test_polish_respects_margin() {
        let layout = Layout::new(5);
        let mut grid = Grid::new(21, 21);
        // room at the first block, its window overlaps the margin
        let center = IVec2::new(5, 5);
        for x in 3..=7 {
            for y in 3..=7 {
                grid.set(x, y, TileType::Floor);
            }
        }
        for seed in 0..20 {
            let mut polished = grid.clone();
            polish(&mut polished, &[center], &layout, &mut StdRng::seed_from_u64(seed));
            for i in 0..21 {
                for m in 0..layout.wrap_width {
                    assert!(!polished.is_walkable(i, m));
                    assert!(!polished.is_walkable(m, i));
                }
            }
        }
    }

    #[test]
    fn test_polish_deterministic() {
        let (grid, layout, center) = lone_room();
        let mut a = grid.clone();
        let mut b = grid;
        polish(&mut a, &[center], &layout, &mut StdRng::seed_from_u64(3));
        polish(&mut b, &[center], &layout, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_rooms_no_change() {
        let (mut grid, layout, _) = lone_room();
        let before = grid.clone();
        assert_eq!(polish(&mut grid, &[], &layout, &mut StdRng::seed_from_u64(1)), 0);
        assert_eq!(grid, before);
    }
}
