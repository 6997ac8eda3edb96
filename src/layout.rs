//! Mapping between intersection-grid slots and tile coordinates.
//!
//! Every intersection slot expands into a `room_size x room_size` block of
//! tiles, and the whole map is wrapped in a margin of `wrap_width` blocked tiles.

use glam::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub room_size: i32,
    /// Blocked margin around the map, `ceil(room_size / 2)`
    pub wrap_width: i32,
    /// Offset of the centre row/column inside a block
    pub middle: i32,
}

impl Layout {
    pub fn new(room_size: i32) -> Self {
        Self {
            room_size,
            wrap_width: (room_size + 1) / 2,
            middle: room_size / 2,
        }
    }

    /// Tile dimensions of the map for an intersection grid of the given size.
    pub fn tile_dimensions(&self, slots_wide: i32, slots_high: i32) -> (usize, usize) {
        let width = slots_wide * self.room_size + 2 * self.wrap_width;
        let height = slots_high * self.room_size + 2 * self.wrap_width;
        (width as usize, height as usize)
    }

    /// Lowest-left tile of the block for `slot`.
    pub fn block_origin(&self, slot: IVec2) -> IVec2 {
        slot * self.room_size + IVec2::splat(self.wrap_width)
    }

    /// Centre tile of the block for `slot`.
    pub fn block_center(&self, slot: IVec2) -> IVec2 {
        self.block_origin(slot) + IVec2::splat(self.middle)
    }

    /// Corridor stubs of a room: the centre row/column where it meets each block edge.
    ///
    /// Order is left, right, down, up.
    pub fn room_stubs(&self, slot: IVec2) -> [IVec2; 4] {
        let origin = self.block_origin(slot);
        let center = self.block_center(slot);
        let far = self.room_size - 1;
        [
            IVec2::new(origin.x, center.y),
            IVec2::new(origin.x + far, center.y),
            IVec2::new(center.x, origin.y),
            IVec2::new(center.x, origin.y + far),
        ]
    }

    /// Both ends of the corridor in `slot`, low end first.
    ///
    /// Even columns hold vertical corridors, odd columns horizontal ones.
    pub fn corridor_ends(&self, slot: IVec2) -> (IVec2, IVec2) {
        let origin = self.block_origin(slot);
        let center = self.block_center(slot);
        let far = self.room_size - 1;
        if is_vertical_corridor(slot) {
            (IVec2::new(center.x, origin.y), IVec2::new(center.x, origin.y + far))
        } else {
            (IVec2::new(origin.x, center.y), IVec2::new(origin.x + far, center.y))
        }
    }

    /// Intersection slot covering tile `tile`, ignoring the margin.
    pub fn slot_of(&self, tile: IVec2) -> IVec2 {
        (tile - IVec2::splat(self.wrap_width)).div_euclid(IVec2::splat(self.room_size))
    }

    /// Position of `tile` inside its block.
    pub fn offset_in_block(&self, tile: IVec2) -> IVec2 {
        (tile - IVec2::splat(self.wrap_width)).rem_euclid(IVec2::splat(self.room_size))
    }

    /// Half-width of the square window the polisher scans around a room centre.
    pub fn polish_half_width(&self) -> i32 {
        self.room_size - 2
    }

    /// Number of polish passes.
    pub fn polish_passes(&self) -> i32 {
        (self.room_size - 1) / 2 + 1
    }
}

pub fn is_vertical_corridor(slot: IVec2) -> bool {
    slot.x % 2 == 0
}
