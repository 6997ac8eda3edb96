use std::collections::VecDeque;

use glam::{IVec2, Vec2};

use crate::error::NavError;
use crate::navgraph::NavGraph;
use crate::waypoint::WaypointId;

/// One entry of a route: a graph waypoint, or the raw destination point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub point: Vec2,
    pub waypoint: Option<WaypointId>,
}

/// Route consumed nearest-first, like a stack.
///
/// The start waypoint itself is not included: the first step is the
/// waypoint after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    /// Farthest step first, so `last()` is the next one to walk to
    steps: Vec<PathStep>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Next step to walk to.
    pub fn peek(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    pub fn pop(&mut self) -> Option<PathStep> {
        self.steps.pop()
    }

    /// Steps in travel order.
    pub fn iter(&self) -> impl Iterator<Item = &PathStep> {
        self.steps.iter().rev()
    }

    /// Waypoints in travel order, skipping an off-graph destination.
    pub fn waypoints(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.iter().filter_map(|step| step.waypoint)
    }

    /// Final point of the route.
    pub fn destination(&self) -> Option<Vec2> {
        self.steps.first().map(|step| step.point)
    }

    /// Point a mover at `position` should head for next.
    ///
    /// Pops the current step once it is within `arrive_dist`. `None` means
    /// the destination has been reached.
    pub fn next_point(&mut self, position: Vec2, arrive_dist: f32) -> Option<Vec2> {
        let current = self.peek()?.point;
        if current.distance(position) <= arrive_dist {
            self.pop();
            return self.peek().map(|step| step.point);
        }
        Some(current)
    }
}

/// Closest waypoint to `position` by euclidean distance. Ties go to the
/// first waypoint in iteration order.
pub fn nearest_waypoint<I>(waypoints: I, position: Vec2) -> Option<WaypointId>
where
    I: IntoIterator<Item = (WaypointId, IVec2)>,
{
    let mut best: Option<(WaypointId, f32)> = None;
    for (id, pos) in waypoints {
        let dist = pos.as_vec2().distance_squared(position);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((id, dist));
        }
    }
    best.map(|(id, _)| id)
}

/// Breadth-first route over the navigation graph.
///
/// Both ends snap to their nearest waypoint. When `to` is not exactly a
/// waypoint it is kept as the final step. The search explores the whole
/// graph; graphs are small.
pub fn find_path(graph: &NavGraph, from: Vec2, to: Vec2) -> Result<Path, NavError> {
    puffin::profile_function!();

    let waypoints = graph.waypoints();
    let start = nearest_waypoint(waypoints.iter(), from).ok_or(NavError::EmptyGraph)?;
    let end = nearest_waypoint(waypoints.iter(), to).ok_or(NavError::EmptyGraph)?;

    let mut came_from: Vec<Option<WaypointId>> = vec![None; graph.len()];
    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::new();
    seen[start.index()] = true;
    queue.push_back(start);

    while let Some(curr) = queue.pop_front() {
        for &next in graph.neighbors(curr) {
            if !seen[next.index()] {
                seen[next.index()] = true;
                came_from[next.index()] = Some(curr);
                queue.push_back(next);
            }
        }
    }

    debug_assert!(seen[end.index()], "generated navigation graph must be connected");
    if !seen[end.index()] {
        log::error!(
            "navigation graph is disconnected: no route from {} to {}",
            waypoints.position(start),
            waypoints.position(end)
        );
        return Err(NavError::Unreachable { from, to });
    }

    let mut steps = Vec::new();
    if waypoints.point(end) != to {
        steps.push(PathStep {
            point: to,
            waypoint: None,
        });
    }
    let mut curr = end;
    while curr != start {
        steps.push(PathStep {
            point: waypoints.point(curr),
            waypoint: Some(curr),
        });
        match came_from[curr.index()] {
            Some(prev) => curr = prev,
            None => break,
        }
    }

    Ok(Path { steps })
}
