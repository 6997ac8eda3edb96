use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    Wall,
    /// Room floor, including floor eroded into walls by the polisher
    Floor,
    /// One-tile-wide corridor line
    Corridor,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor | TileType::Corridor)
    }

    pub fn blocks_movement(&self) -> bool {
        !self.is_walkable()
    }

    /// Single-character code used in compact grid dumps.
    pub fn glyph(&self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
            TileType::Corridor => '+',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Set when the boundary polisher turned this wall into floor
    pub polished: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            polished: false,
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.tile_type.is_walkable()
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkability() {
        assert!(!TileType::Wall.is_walkable());
        assert!(TileType::Floor.is_walkable());
        assert!(TileType::Corridor.is_walkable());
        assert!(TileType::Wall.blocks_movement());
    }

    #[test]
    fn test_default_tile_is_unpolished_wall() {
        let tile = Tile::default();
        assert_eq!(tile.tile_type, TileType::Wall);
        assert!(!tile.polished);
    }
}
