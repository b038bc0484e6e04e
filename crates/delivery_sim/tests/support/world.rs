use delivery_sim::behaviour::DriverBehaviour;
use delivery_sim::mutation::MutationThresholds;
use delivery_sim::scenario::{
    DispatchPolicyKind, DriverSpec, ScenarioParams, ScheduledRequestSpec,
};

/// Thresholds that never trip, so behaviour mutation stays out of the
/// way of scenario assertions.
pub fn neutral_thresholds() -> MutationThresholds {
    MutationThresholds {
        max_time_since_mutation: 1_000_000,
        max_expired_count: 1_000_000,
        min_earnings_ratio: 0.0,
        min_accepted_ratio: 0.0,
    }
}

pub fn driver(id: u32, x: f64, y: f64, speed: f64, behaviour: DriverBehaviour) -> DriverSpec {
    DriverSpec {
        id,
        x,
        y,
        speed,
        behaviour,
    }
}

pub fn scheduled(creation_time: u64, pickup: (f64, f64), dropoff: (f64, f64)) -> ScheduledRequestSpec {
    ScheduledRequestSpec {
        creation_time,
        pickup,
        dropoff,
    }
}

/// A quiet scenario: no stochastic arrivals, neutral mutation, explicit
/// drivers and schedule.
pub fn scripted_scenario(
    drivers: Vec<DriverSpec>,
    scheduled_requests: Vec<ScheduledRequestSpec>,
    dispatch_policy: DispatchPolicyKind,
    timeout: u64,
) -> ScenarioParams {
    ScenarioParams {
        drivers,
        dispatch_policy,
        request_rate: 0.0,
        scheduled_requests,
        timeout,
        mutation_thresholds: neutral_thresholds(),
        ..ScenarioParams::default()
    }
}
