//! Navigation graph: undirected adjacency over registered waypoints.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::waypoint::{WaypointId, WaypointKind, Waypoints};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavGraph {
    waypoints: Waypoints,
    adjacency: Vec<Vec<WaypointId>>,
}

impl NavGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a waypoint with an empty neighbour list on first touch.
    pub fn add_waypoint(&mut self, position: IVec2, kind: WaypointKind) -> WaypointId {
        let id = self.waypoints.insert(position, kind);
        if self.adjacency.len() <= id.index() {
            self.adjacency.resize_with(id.index() + 1, Vec::new);
        }
        id
    }

    /// Add an undirected edge. Repeated and self edges are ignored.
    pub fn connect(&mut self, a: WaypointId, b: WaypointId) {
        if a == b || self.adjacency[a.index()].contains(&b) {
            return;
        }
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
    }

    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }

    pub fn neighbors(&self, id: WaypointId) -> &[WaypointId] {
        &self.adjacency[id.index()]
    }

    pub fn has_edge(&self, a: WaypointId, b: WaypointId) -> bool {
        self.adjacency[a.index()].contains(&b)
    }

    /// Each undirected edge once, lower id first.
    pub fn edges(&self) -> impl Iterator<Item = (WaypointId, WaypointId)> + '_ {
        self.waypoints.ids().flat_map(move |a| {
            self.neighbors(a)
                .iter()
                .filter(move |&&b| a < b)
                .map(move |&b| (a, b))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Ids of every room centre, in creation order.
    pub fn rooms(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.waypoints
            .ids()
            .filter(move |&id| self.waypoints.kind(id) == WaypointKind::Room)
    }

    /// Breadth-first reachability from `start`.
    pub fn reachable_from(&self, start: WaypointId) -> Vec<bool> {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::new();
        seen[start.index()] = true;
        queue.push_back(start);
        while let Some(curr) = queue.pop_front() {
            for &next in self.neighbors(curr) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// True when every waypoint is reachable from every other one.
    pub fn is_connected(&self) -> bool {
        match self.waypoints.ids().next() {
            Some(first) => self.reachable_from(first).into_iter().all(|seen| seen),
            None => true,
        }
    }

    /// Rooms reachable from `room` without passing through another room centre.
    pub fn adjacent_rooms(&self, room: WaypointId) -> Vec<WaypointId> {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::new();
        let mut rooms = Vec::new();
        seen[room.index()] = true;
        queue.push_back(room);
        while let Some(curr) = queue.pop_front() {
            for &next in self.neighbors(curr) {
                if seen[next.index()] {
                    continue;
                }
                seen[next.index()] = true;
                if self.waypoints.kind(next) == WaypointKind::Room {
                    rooms.push(next);
                } else {
                    queue.push_back(next);
                }
            }
        }
        rooms
    }

    /// Restore lookup indices after deserialization.
    pub fn reindex(&mut self) {
        self.waypoints.reindex();
    }
}
