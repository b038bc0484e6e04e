//! Test helpers for common world setup and entity spawning.

use bevy_ecs::prelude::{Entity, World};

use crate::behaviour::DriverBehaviour;
use crate::clock::SimulationClock;
use crate::dispatch::{DispatchPolicyResource, NearestNeighborPolicy};
use crate::ecs::{Driver, Position, Request};
use crate::generator::{PoissonRequestSource, RequestSourceResource};
use crate::grid::Point;
use crate::mutation::{DecisionTreeRule, MutationRuleResource, MutationThresholds};
use crate::pricing::FareConfig;
use crate::scenario::RequestTimeout;
use crate::telemetry::SimTelemetry;

/// A `Point` that must be valid; for use in tests only.
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y).expect("test point inside grid")
}

/// A world with default engine resources: clock at 0, empty telemetry,
/// timeout 20, default fares, NearestNeighbor(3) dispatch, a silent
/// request source, and the decision-tree mutation rule.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(RequestTimeout(20));
    world.insert_resource(FareConfig::default());
    world.insert_resource(DispatchPolicyResource::new(Box::new(
        NearestNeighborPolicy::new(3),
    )));
    world.insert_resource(RequestSourceResource(Box::new(PoissonRequestSource::new(
        0.0, 7,
    ))));
    world.insert_resource(MutationRuleResource(Box::new(DecisionTreeRule::new(
        MutationThresholds::default(),
        7,
    ))));
    world
}

/// Spawn an idle driver at `(x, y)`.
pub fn spawn_driver(
    world: &mut World,
    id: u32,
    x: f64,
    y: f64,
    speed: f64,
    behaviour: DriverBehaviour,
) -> Entity {
    let driver = Driver::new(id, speed, behaviour).expect("valid test driver");
    world.spawn((driver, Position(point(x, y)))).id()
}

/// Spawn a waiting request.
pub fn spawn_request(
    world: &mut World,
    id: u64,
    pickup: (f64, f64),
    dropoff: (f64, f64),
    creation_time: u64,
) -> Entity {
    world
        .spawn(Request::new(
            id,
            point(pickup.0, pickup.1),
            point(dropoff.0, dropoff.1),
            creation_time,
        ))
        .id()
}
