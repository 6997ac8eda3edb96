use glam::Vec2;

/// Position component - world coordinates, tile centres on integers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Circular collision footprint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub radius: f32,
}

impl Collider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Whether a circle of `radius` at `at` overlaps this collider at `pos`,
    /// keeping `spacing` of free space between them.
    pub fn overlaps(&self, pos: Vec2, at: Vec2, radius: f32, spacing: f32) -> bool {
        pos.distance(at) < self.radius + spacing + radius
    }
}

/// Static wall occupying one blocked tile
#[derive(Debug, Clone, Copy)]
pub struct Wall;

/// Marker for anything agents must steer around
#[derive(Debug, Clone, Copy)]
pub struct BlocksMovement;

/// Scatter obstacle inside a room; its side length is twice the collider radius
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Player,
    /// Patrols between rooms and chases the player on sight
    Guard,
    /// Stationary lookout that raises alerts
    Overseer,
    /// Flees from the player; collecting all of them wins the level
    Target,
}

/// Unit component
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    pub kind: UnitKind,
    /// Room the unit was spawned in
    pub home_room: crate::waypoint::WaypointId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collider_overlap_with_spacing() {
        let collider = Collider::new(0.4);
        let pos = Vec2::new(0.0, 0.0);
        assert!(collider.overlaps(pos, Vec2::new(1.0, 0.0), 0.3, 0.5));
        assert!(!collider.overlaps(pos, Vec2::new(1.0, 0.0), 0.3, 0.0));
    }
}
