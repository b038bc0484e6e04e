use bevy_ecs::prelude::World;
use tracing::debug;

use crate::dispatch::{DispatchPolicyResource, GlobalGreedyPolicy, NearestNeighborPolicy};
use crate::ecs::{Driver, Position};
use crate::error::SimError;
use crate::generator::{PoissonRequestSource, RequestSourceResource};
use crate::grid::Point;
use crate::mutation::{DecisionTreeRule, MutationRuleResource};
use crate::pricing::FareConfig;
use crate::scenario::params::{DispatchPolicyKind, RequestTimeout, ScenarioParams};
use crate::clock::SimulationClock;
use crate::telemetry::SimTelemetry;

/// Populate `world` with the engine resources and the scenario's drivers.
///
/// Fails on the first invalid driver spec or scheduled request; the
/// caller decides whether to abort the run.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), SimError> {
    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(RequestTimeout(params.timeout));
    world.insert_resource(FareConfig {
        base_fee: params.base_fee,
        distance_fee: params.distance_fee,
    });

    world.insert_resource(match params.dispatch_policy {
        DispatchPolicyKind::NearestNeighbor { k } => {
            DispatchPolicyResource::new(Box::new(NearestNeighborPolicy::new(k)))
        }
        DispatchPolicyKind::GlobalGreedy => DispatchPolicyResource::new(Box::new(GlobalGreedyPolicy)),
    });

    let mut source = PoissonRequestSource::new(params.request_rate, params.seed);
    for scheduled in &params.scheduled_requests {
        let pickup = Point::new(scheduled.pickup.0, scheduled.pickup.1)?;
        let dropoff = Point::new(scheduled.dropoff.0, scheduled.dropoff.1)?;
        source.schedule(scheduled.creation_time, pickup, dropoff);
    }
    world.insert_resource(RequestSourceResource(Box::new(source)));

    world.insert_resource(MutationRuleResource(Box::new(DecisionTreeRule::new(
        params.mutation_thresholds,
        params.seed,
    ))));

    for spec in &params.drivers {
        let position = Point::new(spec.x, spec.y)?;
        let driver = Driver::new(spec.id, spec.speed, spec.behaviour)?;
        world.spawn((driver, Position(position)));
    }
    debug!(
        drivers = params.drivers.len(),
        scheduled = params.scheduled_requests.len(),
        "scenario built"
    );
    Ok(())
}
