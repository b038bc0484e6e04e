//! Behaviour mutation: lets the configured rule inspect each driver at
//! the end of the tick.

use bevy_ecs::prelude::{Entity, Query, Res};
use tracing::debug;

use crate::clock::SimulationClock;
use crate::ecs::Driver;
use crate::mutation::MutationRuleResource;

pub fn behaviour_mutation_system(
    clock: Res<SimulationClock>,
    rule: Res<MutationRuleResource>,
    mut drivers: Query<(Entity, &mut Driver)>,
) {
    let now = clock.now();

    let mut order: Vec<(u32, Entity)> = drivers
        .iter()
        .map(|(entity, driver)| (driver.id, entity))
        .collect();
    order.sort_unstable();

    for (_, entity) in order {
        let Ok((_, mut driver)) = drivers.get_mut(entity) else {
            continue;
        };
        let before = driver.behaviour;
        rule.maybe_mutate(&mut driver, now);
        if driver.behaviour != before {
            debug!(
                driver = driver.id,
                from = before.label(),
                to = driver.behaviour.label(),
                time = now,
                "behaviour mutated"
            );
        }
    }
}
