//! Simulation handle: owns the world and schedule, advances ticks, and
//! exposes snapshots. There is no global simulation instance; callers
//! construct a handle and thread it through their driving loop.

use bevy_ecs::prelude::{Resource, Schedule, World};

use crate::clock::SimulationClock;
use crate::dispatch::DispatchPolicyResource;
use crate::error::SimError;
use crate::generator::RequestSourceResource;
use crate::mutation::MutationRuleResource;
use crate::pricing::FareConfig;
use crate::runner;
use crate::scenario::{build_scenario, RequestTimeout, ScenarioParams};
use crate::telemetry::{capture_snapshot, SimSnapshot, SimTelemetry};

pub struct DeliverySimulation {
    world: World,
    schedule: Schedule,
}

impl DeliverySimulation {
    /// Build a simulation from scenario parameters.
    pub fn new(params: ScenarioParams) -> Result<Self, SimError> {
        let mut world = World::new();
        build_scenario(&mut world, params)?;
        Ok(Self {
            world,
            schedule: runner::simulation_schedule(),
        })
    }

    /// Wrap an externally assembled world (e.g. from test helpers). The
    /// world must already carry the engine resources; `tick` and
    /// `get_snapshot` report `NotInitialized` otherwise.
    pub fn from_world(world: World) -> Self {
        Self {
            world,
            schedule: runner::simulation_schedule(),
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.ensure_initialized()?;
        runner::tick(&mut self.world, &mut self.schedule);
        Ok(())
    }

    /// Advance the simulation by `ticks` ticks.
    pub fn run(&mut self, ticks: u64) -> Result<(), SimError> {
        self.ensure_initialized()?;
        runner::run_ticks(&mut self.world, &mut self.schedule, ticks);
        Ok(())
    }

    /// Project the current state for display. Observes only: calling
    /// this any number of times between ticks yields identical results.
    pub fn get_snapshot(&mut self) -> Result<SimSnapshot, SimError> {
        self.ensure_initialized()?;
        Ok(capture_snapshot(&mut self.world))
    }

    pub fn time(&self) -> u64 {
        self.world
            .get_resource::<SimulationClock>()
            .map(|clock| clock.now())
            .unwrap_or(0)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn ensure_initialized(&self) -> Result<(), SimError> {
        fn check<T: Resource>(world: &World, missing: &'static str) -> Result<(), SimError> {
            if world.contains_resource::<T>() {
                Ok(())
            } else {
                Err(SimError::NotInitialized { missing })
            }
        }
        check::<SimulationClock>(&self.world, "SimulationClock")?;
        check::<SimTelemetry>(&self.world, "SimTelemetry")?;
        check::<RequestTimeout>(&self.world, "RequestTimeout")?;
        check::<FareConfig>(&self.world, "FareConfig")?;
        check::<DispatchPolicyResource>(&self.world, "DispatchPolicyResource")?;
        check::<RequestSourceResource>(&self.world, "RequestSourceResource")?;
        check::<MutationRuleResource>(&self.world, "MutationRuleResource")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_world_reports_not_initialized() {
        let mut sim = DeliverySimulation::from_world(World::new());
        assert!(matches!(
            sim.tick(),
            Err(SimError::NotInitialized { .. })
        ));
        assert!(matches!(
            sim.get_snapshot(),
            Err(SimError::NotInitialized { .. })
        ));
    }

    #[test]
    fn built_scenario_ticks_and_snapshots() {
        let mut sim = DeliverySimulation::new(ScenarioParams::default()).expect("scenario");
        sim.tick().expect("tick");
        let snapshot = sim.get_snapshot().expect("snapshot");
        assert_eq!(snapshot.time, 1);
        assert_eq!(sim.time(), 1);
    }
}
