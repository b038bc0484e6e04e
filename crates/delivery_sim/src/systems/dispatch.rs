//! Dispatch: offers, driver acceptance, conflict resolution, assignment.
//!
//! One system covers the whole pipeline because the stages are strictly
//! sequential within the tick and share the same offer list:
//!
//! 1. collect idle drivers and waiting requests in stable id order,
//! 2. let the policy propose (driver, request) offers,
//! 3. keep the offers each driver's behaviour accepts,
//! 4. keep the first accepted offer per request (conflict resolution),
//! 5. re-check both sides and apply the assignment.
//!
//! The re-check in step 5 skips silently: a driver matched to two
//! requests in one tick legitimately loses all but the first.

use std::collections::HashSet;

use bevy_ecs::prelude::{Entity, Query, Res};
use tracing::debug;

use crate::clock::SimulationClock;
use crate::dispatch::{DispatchPolicyResource, DriverView, Offer, RequestView};
use crate::ecs::{Driver, DriverState, Position, Request, RequestState};

pub fn dispatch_system(
    clock: Res<SimulationClock>,
    policy: Res<DispatchPolicyResource>,
    mut drivers: Query<(Entity, &mut Driver, &Position)>,
    mut requests: Query<(Entity, &mut Request)>,
) {
    let now = clock.now();

    let mut idle: Vec<DriverView> = drivers
        .iter()
        .filter(|(_, driver, _)| driver.state == DriverState::Idle)
        .map(|(entity, driver, position)| DriverView {
            entity,
            id: driver.id,
            position: position.0,
            speed: driver.speed,
        })
        .collect();
    idle.sort_by_key(|view| view.id);

    let mut waiting: Vec<RequestView> = requests
        .iter()
        .filter(|(_, request)| request.state == RequestState::Waiting)
        .map(|(entity, request)| RequestView {
            entity,
            id: request.id,
            pickup: request.pickup,
            dropoff: request.dropoff,
        })
        .collect();
    waiting.sort_by_key(|view| view.id);

    if idle.is_empty() || waiting.is_empty() {
        return;
    }

    let offers = policy.assign(&idle, &waiting, now);

    let mut accepted: Vec<Offer> = Vec::new();
    for offer in offers {
        let Ok((_, driver, position)) = drivers.get(offer.driver) else {
            continue;
        };
        let Ok((_, request)) = requests.get(offer.request) else {
            continue;
        };
        if driver.decide(position.0, request.pickup, request.dropoff, now) {
            accepted.push(offer);
        }
    }

    let mut claimed: HashSet<Entity> = HashSet::new();
    let mut assignments: Vec<Offer> = Vec::new();
    for offer in accepted {
        if claimed.insert(offer.request) {
            assignments.push(offer);
        }
    }

    for offer in assignments {
        let Ok((_, mut driver, position)) = drivers.get_mut(offer.driver) else {
            continue;
        };
        let Ok((_, mut request)) = requests.get_mut(offer.request) else {
            continue;
        };
        if driver.state != DriverState::Idle || request.state != RequestState::Waiting {
            continue;
        }
        let took_it = driver
            .assign_request(position.0, offer.request, &mut request, now)
            .expect("idle driver and waiting request re-checked above");
        if took_it {
            debug!(
                driver = driver.id,
                request = request.id,
                time = now,
                "request assigned"
            );
        }
    }
}
