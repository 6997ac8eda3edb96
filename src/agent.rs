//! Queries agents make against a generated dungeon: contact, sight and
//! patrol targets.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{ARRIVE_DISTANCE, CONTACT_DISTANCE, SIGHT_RADIUS_ROOMS};
use crate::dungeon::Dungeon;
use crate::waypoint::WaypointId;

/// Whether two units are close enough to touch.
pub fn contact(a: Vec2, b: Vec2) -> bool {
    a.distance(b) <= CONTACT_DISTANCE
}

/// Whether a mover at `position` counts as standing on `point`.
pub fn arrived(position: Vec2, point: Vec2) -> bool {
    position.distance(point) <= ARRIVE_DISTANCE
}

/// Whether an observer can see a target.
///
/// The target must be within `1.5 * room_size` tiles and stand in the
/// observer's room or in a room one corridor away.
pub fn can_see(dungeon: &Dungeon, observer: Vec2, target: Vec2) -> bool {
    let radius = SIGHT_RADIUS_ROOMS * dungeon.layout.room_size as f32;
    if observer.distance(target) > radius {
        return false;
    }
    let (Some(own), Some(other)) = (dungeon.nearest_room(observer), dungeon.nearest_room(target))
    else {
        return false;
    };
    own == other || dungeon.graph.adjacent_rooms(own).contains(&other)
}

/// Random room to patrol towards, never the room the agent is standing in.
pub fn patrol_destination(dungeon: &Dungeon, position: Vec2, rng: &mut impl Rng) -> Option<WaypointId> {
    let current = dungeon.nearest_room(position)?;
    let candidates: Vec<WaypointId> = dungeon
        .rooms
        .iter()
        .copied()
        .filter(|&room| room != current)
        .collect();
    candidates.choose(rng).copied()
}
