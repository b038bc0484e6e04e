//! Request generation: pulls this tick's new requests from the source
//! and spawns them into the world.

use bevy_ecs::prelude::{Commands, Res, ResMut};
use tracing::debug;

use crate::clock::SimulationClock;
use crate::generator::RequestSourceResource;

pub fn request_inbound_system(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut source: ResMut<RequestSourceResource>,
) {
    let now = clock.now();
    for request in source.0.maybe_generate(now) {
        debug!(request = request.id, time = now, "request inbound");
        commands.spawn(request);
    }
}
