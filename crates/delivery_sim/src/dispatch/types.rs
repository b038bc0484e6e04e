use bevy_ecs::prelude::Entity;

use crate::grid::Point;

/// Floor applied to driver speed when estimating travel time, so a
/// degenerate configuration cannot divide by zero.
pub const SPEED_FLOOR: f64 = 1e-9;

/// Read-only view of an idle driver, as seen by dispatch policies.
#[derive(Debug, Clone, Copy)]
pub struct DriverView {
    pub entity: Entity,
    pub id: u32,
    pub position: Point,
    pub speed: f64,
}

/// Read-only view of a waiting request, as seen by dispatch policies.
#[derive(Debug, Clone, Copy)]
pub struct RequestView {
    pub entity: Entity,
    pub id: u64,
    pub pickup: Point,
    pub dropoff: Point,
}

/// A proposed, non-binding (driver, request) pairing for one tick.
/// Consumed by the engine within the same tick; never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Offer {
    pub driver: Entity,
    pub request: Entity,
    pub estimated_travel_time: f64,
    pub estimated_reward: f64,
}
