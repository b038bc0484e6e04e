pub mod behaviour;
pub mod clock;
pub mod dispatch;
pub mod ecs;
pub mod error;
pub mod generator;
pub mod grid;
pub mod mutation;
pub mod pricing;
pub mod runner;
pub mod scenario;
pub mod simulation;
pub mod systems;
pub mod telemetry;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
