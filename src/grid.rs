use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::tile::{Tile, TileType};

/// Full-resolution tile map, row-major with `(0, 0)` at the bottom left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Grid {
    /// A grid with every tile blocked.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); width * height],
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(&self.tiles[y as usize * self.width + x as usize])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(&mut self.tiles[y as usize * self.width + x as usize])
    }

    pub fn at(&self, pos: IVec2) -> Option<&Tile> {
        self.get(pos.x, pos.y)
    }

    pub fn set(&mut self, x: i32, y: i32, tile_type: TileType) {
        if let Some(tile) = self.get_mut(x, y) {
            tile.tile_type = tile_type;
        }
    }

    /// Out-of-bounds positions count as blocked.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Tile::is_walkable)
    }

    /// All blocked tile coordinates, row by row.
    pub fn blocked_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(i, tile)| {
            (!tile.is_walkable()).then(|| IVec2::new((i % self.width) as i32, (i / self.width) as i32))
        })
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }

    /// Binary walkability mask, one row per `y`.
    pub fn walkable_mask(&self) -> Vec<Vec<bool>> {
        self.tiles
            .chunks(self.width)
            .map(|row| row.iter().map(Tile::is_walkable).collect())
            .collect()
    }

    /// Whether every tile on the axis-aligned segment `a..=b` is walkable.
    /// Diagonal segments are never clear.
    pub fn is_clear_line(&self, a: IVec2, b: IVec2) -> bool {
        if a.x != b.x && a.y != b.y {
            return false;
        }
        let step = (b - a).signum();
        let mut pos = a;
        loop {
            if !self.is_walkable(pos.x, pos.y) {
                return false;
            }
            if pos == b {
                return true;
            }
            pos += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_blocked() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.tiles.len(), 12);
        assert_eq!(grid.walkable_count(), 0);
        assert_eq!(grid.blocked_tiles().count(), 12);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = Grid::new(4, 3);
        assert!(grid.get(-1, 0).is_none());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(!grid.is_walkable(10, 10));
    }

    #[test]
    fn test_clear_line() {
        let mut grid = Grid::new(6, 6);
        for x in 1..5 {
            grid.set(x, 2, TileType::Corridor);
        }
        assert!(grid.is_clear_line(IVec2::new(1, 2), IVec2::new(4, 2)));
        assert!(grid.is_clear_line(IVec2::new(4, 2), IVec2::new(1, 2)));
        assert!(!grid.is_clear_line(IVec2::new(0, 2), IVec2::new(4, 2)));
        assert!(!grid.is_clear_line(IVec2::new(1, 2), IVec2::new(2, 3)));
    }

    #[test]
    fn test_blocked_tiles_coordinates() {
        let mut grid = Grid::new(3, 2);
        for x in 0..3 {
            grid.set(x, 0, TileType::Floor);
        }
        grid.set(1, 1, TileType::Floor);
        let blocked: Vec<IVec2> = grid.blocked_tiles().collect();
        assert_eq!(blocked, vec![IVec2::new(0, 1), IVec2::new(2, 1)]);
    }

    #[test]
    fn test_walkable_mask_rows() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, TileType::Floor);
        assert_eq!(grid.walkable_mask(), vec![vec![false, true], vec![false, false]]);
    }
}
