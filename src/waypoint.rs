//! Waypoint registry.
//!
//! Each waypoint is created once, by the generation step that owns its
//! position, and gets a stable index. Graph edges refer to these indices,
//! never to raw coordinates.

use std::collections::HashMap;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointId(pub u32);

impl WaypointId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which construction step produced a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaypointKind {
    /// Centre of a room block
    Room,
    /// Where a room's centre line meets its block edge
    Stub,
    /// One end of a one-tile-wide corridor
    CorridorEnd,
}

/// Arena of waypoints with a position index for construction-time lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Waypoints {
    positions: Vec<IVec2>,
    kinds: Vec<WaypointKind>,
    #[serde(skip)]
    by_position: HashMap<IVec2, WaypointId>,
}

impl Waypoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a waypoint, or return the existing one at the same tile.
    pub fn insert(&mut self, position: IVec2, kind: WaypointKind) -> WaypointId {
        if let Some(&id) = self.by_position.get(&position) {
            return id;
        }
        let id = WaypointId(self.positions.len() as u32);
        self.positions.push(position);
        self.kinds.push(kind);
        self.by_position.insert(position, id);
        id
    }

    /// Waypoint at exactly this tile, if one was registered.
    pub fn at(&self, position: IVec2) -> Option<WaypointId> {
        self.by_position.get(&position).copied()
    }

    pub fn position(&self, id: WaypointId) -> IVec2 {
        self.positions[id.index()]
    }

    /// Position as a world-space point (tile centres sit on integer coordinates).
    pub fn point(&self, id: WaypointId) -> Vec2 {
        self.position(id).as_vec2()
    }

    pub fn kind(&self, id: WaypointId) -> WaypointKind {
        self.kinds[id.index()]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = WaypointId> {
        (0..self.positions.len() as u32).map(WaypointId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WaypointId, IVec2)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| (WaypointId(i as u32), pos))
    }

    /// Rebuild the position index after deserialization.
    pub fn reindex(&mut self) {
        self.by_position = self.iter().map(|(id, pos)| (pos, id)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut waypoints = Waypoints::new();
        let a = waypoints.insert(IVec2::new(5, 5), WaypointKind::Room);
        let b = waypoints.insert(IVec2::new(3, 5), WaypointKind::Stub);
        assert_eq!(a, WaypointId(0));
        assert_eq!(b, WaypointId(1));
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints.kind(b), WaypointKind::Stub);
        assert_eq!(waypoints.point(a), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_insert_same_position_returns_first_id() {
        let mut waypoints = Waypoints::new();
        let a = waypoints.insert(IVec2::new(1, 2), WaypointKind::Stub);
        let again = waypoints.insert(IVec2::new(1, 2), WaypointKind::CorridorEnd);
        assert_eq!(a, again);
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints.kind(a), WaypointKind::Stub);
    }

    #[test]
    fn test_reindex_after_round_trip() {
        let mut waypoints = Waypoints::new();
        waypoints.insert(IVec2::new(7, 1), WaypointKind::Room);
        let json = serde_json::to_string(&waypoints).unwrap();
        let mut restored: Waypoints = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.at(IVec2::new(7, 1)), None);
        restored.reindex();
        assert_eq!(restored.at(IVec2::new(7, 1)), Some(WaypointId(0)));
    }
}
