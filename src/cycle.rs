//! Random-walk cycle builder.
//!
//! The walk runs over the cells of a coarse grid whose corners are the cross
//! points. Every visited cell bumps a counter on its four corner cross points. Cross points touched by a visited cell become rooms,
//! and the boundary between two rooms becomes a corridor unless the walk
//! itself stepped across it. The untraversed boundary of the visited region
//! is what closes the cycle.
//!
//! The counters live in the intersection grid, which also holds one slot for
//! every edge between two cross points (odd coordinates):
//!
//! ```text
//!   R - R - R        R = cross point (even, even)
//!   |   |   |        - = horizontal edge (odd, even)
//!   R - R - R        | = vertical edge (even, odd)
//! ```

use glam::IVec2;
use rand::Rng;

use crate::constants::{CYCLE_HALF_EDGE, CYCLE_WALKED_EDGE_BIAS};

/// Walk directions, in the order candidates are enumerated.
const DIRECTIONS: [IVec2; 4] = [IVec2::Y, IVec2::NEG_Y, IVec2::NEG_X, IVec2::X];

/// Visited flags of the `(width-1) x (height-1)` walk grid.
#[derive(Debug, Clone)]
pub struct CellGrid {
    width: i32,
    height: i32,
    visited: Vec<bool>,
}

impl CellGrid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            visited: vec![false; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub fn is_visited(&self, cell: IVec2) -> bool {
        self.in_bounds(cell) && self.visited[(cell.y * self.width + cell.x) as usize]
    }

    /// A cell the walk may step into: inside the grid and not yet visited.
    pub fn is_open(&self, cell: IVec2) -> bool {
        self.in_bounds(cell) && !self.is_visited(cell)
    }

    fn mark(&mut self, cell: IVec2) {
        let idx = (cell.y * self.width + cell.x) as usize;
        self.visited[idx] = true;
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}

/// Counter grid of size `(2w-1) x (2h-1)` over cross points and edges.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionGrid {
    width: i32,
    height: i32,
    values: Vec<i32>,
}

impl IntersectionGrid {
    /// Grid for `width x height` cross points.
    pub fn for_cross_points(width: i32, height: i32) -> Self {
        let width = width * 2 - 1;
        let height = height * 2 - 1;
        Self {
            width,
            height,
            values: vec![0; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: IVec2) -> Option<i32> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.values[(pos.y * self.width + pos.x) as usize])
    }

    fn get_mut(&mut self, pos: IVec2) -> Option<&mut i32> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&mut self.values[(pos.y * self.width + pos.x) as usize])
    }

    /// All positions in column-major order (x outer, y inner).
    pub fn positions(&self) -> impl Iterator<Item = IVec2> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| (0..height).map(move |y| IVec2::new(x, y)))
    }
}

/// Output of the walk: the counter grid plus how much of the walk happened.
#[derive(Debug, Clone)]
pub struct CycleWalk {
    pub intersections: IntersectionGrid,
    /// Main-path and side-room cells visited
    pub visited_cells: usize,
    /// Main-path steps actually taken (at most `walk_len - 1`)
    pub steps: u32,
}

/// Run the random walk and close it into a cycle of rooms and corridors.
///
/// `width` and `height` count cross points. A walk that runs out of open
/// neighbours stops early and keeps the shorter cycle.
pub fn build_cycle(
    width: i32,
    height: i32,
    walk_len: u32,
    minor_room_chance: f64,
    rng: &mut impl Rng,
) -> CycleWalk {
    puffin::profile_function!();

    let mut cells = CellGrid::new(width - 1, height - 1);
    let mut grid = IntersectionGrid::for_cross_points(width, height);

    let mut curr = IVec2::new(rng.gen_range(0..cells.width()), rng.gen_range(0..cells.height()));
    visit(&mut cells, &mut grid, curr);

    let mut steps = 0;
    for _ in 1..walk_len {
        let candidates: Vec<IVec2> = DIRECTIONS
            .iter()
            .map(|&dir| curr + dir)
            .filter(|&cell| cells.is_open(cell))
            .collect();

        if candidates.is_empty() {
            log::trace!("walk starved at {curr} after {steps} steps");
            break;
        }

        let pick = rng.gen_range(0..candidates.len());
        let next = candidates[pick];
        visit(&mut cells, &mut grid, next);

        if candidates.len() > 1 && rng.gen_bool(minor_room_chance) {
            let mut side = rng.gen_range(0..candidates.len() - 1);
            if side >= pick {
                side += 1;
            }
            log::trace!("side room at {}", candidates[side]);
            visit(&mut cells, &mut grid, candidates[side]);
        }

        if let Some(slot) = grid.get_mut(crossed_edge(next, next - curr)) {
            *slot = CYCLE_WALKED_EDGE_BIAS;
        }

        curr = next;
        steps += 1;
    }

    close_edges(&mut grid);

    CycleWalk {
        intersections: grid,
        visited_cells: cells.visited_count(),
        steps,
    }
}

/// Mark a cell visited and count it on its four corners.
fn visit(cells: &mut CellGrid, grid: &mut IntersectionGrid, cell: IVec2) {
    cells.mark(cell);
    let origin = cell * 2;
    for corner in [IVec2::ZERO, IVec2::new(0, 2), IVec2::new(2, 0), IVec2::new(2, 2)] {
        if let Some(count) = grid.get_mut(origin + corner) {
            *count += 1;
        }
    }
}

/// Intersection slot of the boundary the walk crossed to enter `next` moving by `dir`.
fn crossed_edge(next: IVec2, dir: IVec2) -> IVec2 {
    match (dir.x, dir.y) {
        // entered from below: bottom side of `next`
        (0, 1) => IVec2::new(next.x * 2 + 1, next.y * 2),
        (0, -1) => IVec2::new(next.x * 2 + 1, (next.y + 1) * 2),
        (-1, 0) => IVec2::new((next.x + 1) * 2, next.y * 2 + 1),
        _ => IVec2::new(next.x * 2, next.y * 2 + 1),
    }
}

/// Add a half edge around every room cross point.
///
/// Edge slots never hold a room count, so updating in place is safe.
fn close_edges(grid: &mut IntersectionGrid) {
    let rooms: Vec<IVec2> = grid
        .positions()
        .filter(|&pos| is_room_value(grid.get(pos).unwrap_or(0)))
        .collect();

    for pos in rooms {
        for dir in DIRECTIONS {
            if let Some(slot) = grid.get_mut(pos + dir) {
                *slot += CYCLE_HALF_EDGE;
            }
        }
    }
}

/// A cross point touched by at least one visited cell.
pub fn is_room_value(value: i32) -> bool {
    0 < value && value < CYCLE_HALF_EDGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CYCLE_FULL_EDGE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn values(walk: &CycleWalk) -> Vec<(IVec2, i32)> {
        let grid = &walk.intersections;
        grid.positions().map(|p| (p, grid.get(p).unwrap())).collect()
    }

    #[test]
    fn test_single_cell_walk_makes_square() {
        let mut rng = StdRng::seed_from_u64(1);
        let walk = build_cycle(2, 2, 1, 0.0, &mut rng);
        assert_eq!(walk.visited_cells, 1);
        assert_eq!(walk.steps, 0);

        let grid = &walk.intersections;
        assert_eq!((grid.width(), grid.height()), (3, 3));
        for corner in [IVec2::new(0, 0), IVec2::new(0, 2), IVec2::new(2, 0), IVec2::new(2, 2)] {
            assert_eq!(grid.get(corner), Some(1));
        }
        for edge in [IVec2::new(1, 0), IVec2::new(1, 2), IVec2::new(0, 1), IVec2::new(2, 1)] {
            assert_eq!(grid.get(edge), Some(CYCLE_FULL_EDGE));
        }
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(0));
    }

    #[test]
    fn test_walked_edge_is_not_a_corridor() {
        // 3x2 cross points: two cells side by side, the walk must cross between them
        let mut rng = StdRng::seed_from_u64(3);
        let walk = build_cycle(3, 2, 2, 0.0, &mut rng);
        assert_eq!(walk.visited_cells, 2);
        assert_eq!(walk.steps, 1);

        let grid = &walk.intersections;
        // the shared boundary is the vertical edge at x = 2
        assert_eq!(grid.get(IVec2::new(2, 1)), Some(CYCLE_WALKED_EDGE_BIAS + 2 * CYCLE_HALF_EDGE));
        // the middle cross points are shared by both cells
        assert_eq!(grid.get(IVec2::new(2, 0)), Some(2));
        assert_eq!(grid.get(IVec2::new(2, 2)), Some(2));
        // outer boundary stays a corridor ring
        for edge in [IVec2::new(0, 1), IVec2::new(4, 1), IVec2::new(1, 0), IVec2::new(3, 2)] {
            assert_eq!(grid.get(edge), Some(CYCLE_FULL_EDGE));
        }
    }

    #[test]
    fn test_walk_starves_on_small_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        let walk = build_cycle(2, 2, 10, 0.5, &mut rng);
        assert_eq!(walk.visited_cells, 1);
        assert_eq!(walk.steps, 0);
    }

    #[test]
    fn test_visited_cells_bounded_by_walk() {
        let mut rng = StdRng::seed_from_u64(42);
        for walk_len in 1..12 {
            let walk = build_cycle(6, 6, walk_len, 1.0, &mut rng);
            assert!(walk.steps < walk_len);
            assert!(walk.visited_cells <= 2 * walk_len as usize - 1);
            assert!(walk.visited_cells >= walk.steps as usize + 1);
        }
    }

    #[test]
    fn test_same_seed_same_walk() {
        let a = build_cycle(5, 5, 9, 0.3, &mut StdRng::seed_from_u64(99));
        let b = build_cycle(5, 5, 9, 0.3, &mut StdRng::seed_from_u64(99));
        assert_eq!(values(&a), values(&b));
    }

    #[test]
    fn test_odd_odd_slots_stay_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        let walk = build_cycle(6, 5, 12, 0.3, &mut rng);
        for (pos, value) in values(&walk) {
            if pos.x % 2 == 1 && pos.y % 2 == 1 {
                assert_eq!(value, 0, "cell interior {pos} was written");
            }
        }
    }
}
