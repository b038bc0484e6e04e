//! Tick runner: advances the clock and executes the per-tick schedule.
//!
//! Clock progression happens here, outside the systems. Each tick runs
//! the stages in a fixed order; reordering them changes observable
//! semantics (e.g. requests must expire before dispatch sees them).

use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{apply_deferred, IntoSystemConfigs};

use crate::clock::SimulationClock;
use crate::systems::{
    behaviour_mutation::behaviour_mutation_system, dispatch::dispatch_system,
    movement::movement_system, request_expiry::request_expiry_system,
    request_inbound::request_inbound_system,
};

/// Builds the per-tick schedule: generate -> expire -> dispatch -> move ->
/// mutate, chained. [apply_deferred] makes freshly spawned requests
/// visible to expiry and dispatch within the same tick.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            request_inbound_system,
            apply_deferred,
            request_expiry_system,
            dispatch_system,
            movement_system,
            behaviour_mutation_system,
        )
            .chain(),
    );
    schedule
}

/// Advance the simulation by one tick.
pub fn tick(world: &mut World, schedule: &mut Schedule) {
    world.resource_mut::<SimulationClock>().advance();
    schedule.run(world);
}

/// Advance the simulation by `ticks` ticks.
pub fn run_ticks(world: &mut World, schedule: &mut Schedule, ticks: u64) {
    for _ in 0..ticks {
        tick(world, schedule);
    }
}
