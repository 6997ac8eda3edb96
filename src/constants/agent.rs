//! Agent movement and perception tolerances.

/// Distance at which a mover counts a waypoint as reached
pub const ARRIVE_DISTANCE: f32 = 1.6;
/// Distance at which two units touch
pub const CONTACT_DISTANCE: f32 = 0.65;
/// Sight radius as a multiple of the room size
pub const SIGHT_RADIUS_ROOMS: f32 = 1.5;
