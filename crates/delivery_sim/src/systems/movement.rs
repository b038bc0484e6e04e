//! Movement: advances busy drivers toward their targets and detects
//! pickup/dropoff completion.
//!
//! The completion check keys off the phase the driver was in before the
//! step, so a driver that snaps onto its pickup and becomes TO_DROPOFF
//! does not also complete the dropoff in the same tick. Idle drivers
//! only refresh their idle-time bookkeeping here.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut};
use tracing::{debug, trace};

use crate::clock::{SimulationClock, TICK_DT};
use crate::ecs::{Driver, DriverState, Position, Request};
use crate::pricing::FareConfig;
use crate::telemetry::SimTelemetry;

pub fn movement_system(
    clock: Res<SimulationClock>,
    fare: Res<FareConfig>,
    mut telemetry: ResMut<SimTelemetry>,
    mut drivers: Query<(Entity, &mut Driver, &mut Position)>,
    mut requests: Query<&mut Request>,
) {
    let now = clock.now();

    let mut order: Vec<(u32, Entity)> = drivers
        .iter()
        .map(|(entity, driver, _)| (driver.id, entity))
        .collect();
    order.sort_unstable();

    for (_, entity) in order {
        let Ok((_, mut driver, mut position)) = drivers.get_mut(entity) else {
            continue;
        };
        let Some(request_entity) = driver.current_request else {
            driver.idle_time = now.saturating_sub(driver.idle_since);
            continue;
        };
        let Ok(mut request) = requests.get_mut(request_entity) else {
            continue;
        };

        let phase = driver.state;
        let target = match phase {
            DriverState::ToPickup => request.pickup,
            DriverState::ToDropoff => request.dropoff,
            DriverState::Idle => continue,
        };
        position.0 = position.0.step_toward(target, driver.speed * TICK_DT);

        match phase {
            DriverState::ToPickup => {
                let arrived = driver
                    .complete_pickup(position.0, &mut request, now)
                    .expect("assigned request in pickup phase");
                if arrived {
                    trace!(
                        driver = driver.id,
                        request = request.id,
                        time = now,
                        "pickup complete"
                    );
                }
            }
            DriverState::ToDropoff => {
                let fare_amount = fare.trip_fare(request.pickup, request.dropoff);
                let delivered = driver
                    .complete_dropoff(position.0, &mut request, fare_amount, now)
                    .expect("picked request in dropoff phase");
                if delivered {
                    telemetry.record_delivery(now.saturating_sub(request.creation_time));
                    debug!(
                        driver = driver.id,
                        request = request.id,
                        fare = fare_amount,
                        time = now,
                        "delivery complete"
                    );
                }
            }
            DriverState::Idle => {}
        }
    }
}
