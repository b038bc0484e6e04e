use bevy_ecs::prelude::Resource;

/// Simulated time advanced per tick, in ticks of the simulation clock.
pub const TICK_DT: f64 = 1.0;

/// Monotonically increasing tick counter; the engine's sole notion of time.
///
/// The runner advances the clock outside the systems, once per tick,
/// before the schedule runs.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advance to the next tick and return the new time.
    pub fn advance(&mut self) -> u64 {
        self.now += 1;
        self.now
    }
}
