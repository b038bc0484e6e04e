//! Expiry: times out stale requests and releases their drivers.
//!
//! A request expires once it has waited past the configured timeout
//! without being picked up. PICKED requests are exempt: an order already
//! in the courier's possession cannot expire.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut};
use tracing::debug;

use crate::clock::SimulationClock;
use crate::ecs::{Driver, Request, RequestState};
use crate::scenario::RequestTimeout;
use crate::telemetry::SimTelemetry;

pub fn request_expiry_system(
    clock: Res<SimulationClock>,
    timeout: Res<RequestTimeout>,
    mut telemetry: ResMut<SimTelemetry>,
    mut requests: Query<(Entity, &mut Request)>,
    mut drivers: Query<&mut Driver>,
) {
    let now = clock.now();
    let mut expired: Vec<Entity> = Vec::new();
    for (entity, mut request) in requests.iter_mut() {
        if !request.is_active() || request.state == RequestState::Picked {
            continue;
        }
        if now.saturating_sub(request.creation_time) > timeout.0 {
            request
                .mark_expired(now)
                .expect("active unpicked request can expire");
            telemetry.record_expiry();
            debug!(request = request.id, time = now, "request expired");
            expired.push(entity);
        }
    }
    if expired.is_empty() {
        return;
    }

    // Drivers en route to an expired pickup return to the idle pool.
    for mut driver in drivers.iter_mut() {
        let Some(current) = driver.current_request else {
            continue;
        };
        if expired.contains(&current) {
            let request_id = requests
                .get(current)
                .map(|(_, request)| request.id)
                .unwrap_or_default();
            driver.release_expired(request_id, now);
            debug!(driver = driver.id, request = request_id, "driver released");
        }
    }
}
