//! Corridor connector: turns corridor slots into graph edges between rooms.

use glam::IVec2;

use crate::layout::{is_vertical_corridor, Layout};
use crate::navgraph::NavGraph;
use crate::trace::{CoarseCell, CoarseMap};
use crate::waypoint::WaypointKind;

/// Add both ends of every corridor and link them to the stubs of the rooms
/// they open into. A corridor end with no stub beyond it stays open.
///
/// Returns the number of corridors added.
pub fn connect_corridors(map: &CoarseMap, layout: &Layout, graph: &mut NavGraph) -> usize {
    puffin::profile_function!();

    let mut corridors = 0;
    for slot in map.positions() {
        if map.get(slot) != CoarseCell::Corridor {
            continue;
        }

        let (low, high) = layout.corridor_ends(slot);
        let outward = if is_vertical_corridor(slot) { IVec2::Y } else { IVec2::X };

        let low_id = graph.add_waypoint(low, WaypointKind::CorridorEnd);
        let high_id = graph.add_waypoint(high, WaypointKind::CorridorEnd);
        graph.connect(low_id, high_id);

        if let Some(stub) = graph.waypoints().at(low - outward) {
            graph.connect(stub, low_id);
        }
        if let Some(stub) = graph.waypoints().at(high + outward) {
            graph.connect(stub, high_id);
        }
        corridors += 1;
    }

    log::debug!("connected {corridors} corridors");
    corridors
}
