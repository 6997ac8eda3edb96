//! Edge tracer: classifies intersection slots and seeds the room graph.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::CYCLE_FULL_EDGE;
use crate::cycle::{is_room_value, IntersectionGrid};
use crate::layout::Layout;
use crate::navgraph::NavGraph;
use crate::waypoint::{WaypointId, WaypointKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoarseCell {
    Empty = 0,
    Room = 1,
    Corridor = 2,
}

/// Intersection grid after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarseMap {
    pub width: i32,
    pub height: i32,
    cells: Vec<CoarseCell>,
}

impl CoarseMap {
    /// Out-of-bounds slots read as empty.
    pub fn get(&self, slot: IVec2) -> CoarseCell {
        if slot.x < 0 || slot.y < 0 || slot.x >= self.width || slot.y >= self.height {
            return CoarseCell::Empty;
        }
        self.cells[(slot.y * self.width + slot.x) as usize]
    }

    pub fn positions(&self) -> impl Iterator<Item = IVec2> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| IVec2::new(x, y)))
    }

    pub fn count(&self, cell: CoarseCell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

/// Classification plus the graph of rooms and their stubs.
#[derive(Debug, Clone)]
pub struct Traced {
    pub map: CoarseMap,
    pub graph: NavGraph,
    /// Room centres in scan order
    pub rooms: Vec<WaypointId>,
}

pub fn trace_edges(grid: &IntersectionGrid, layout: &Layout) -> Traced {
    puffin::profile_function!();

    let mut cells = vec![CoarseCell::Empty; (grid.width() * grid.height()) as usize];
    let mut graph = NavGraph::new();
    let mut rooms = Vec::new();

    for slot in grid.positions() {
        let value = grid.get(slot).unwrap_or(0);
        let cell = if value == CYCLE_FULL_EDGE {
            CoarseCell::Corridor
        } else if is_room_value(value) {
            CoarseCell::Room
        } else {
            CoarseCell::Empty
        };
        cells[(slot.y * grid.width() + slot.x) as usize] = cell;

        if cell == CoarseCell::Room {
            let center = graph.add_waypoint(layout.block_center(slot), WaypointKind::Room);
            for stub in layout.room_stubs(slot) {
                let stub = graph.add_waypoint(stub, WaypointKind::Stub);
                graph.connect(center, stub);
            }
            rooms.push(center);
        }
    }

    log::debug!("traced {} rooms", rooms.len());

    Traced {
        map: CoarseMap {
            width: grid.width(),
            height: grid.height(),
            cells,
        },
        graph,
        rooms,
    }
}
