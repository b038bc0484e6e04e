use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::behaviour::DriverBehaviour;
use crate::mutation::MutationThresholds;
use crate::pricing::{DEFAULT_BASE_FEE, DEFAULT_DISTANCE_FEE};

/// Ticks an unpicked request may wait before it is forcibly expired.
#[derive(Debug, Clone, Copy, Resource, Serialize, Deserialize)]
pub struct RequestTimeout(pub u64);

/// Which dispatch policy the scenario installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchPolicyKind {
    NearestNeighbor { k: usize },
    GlobalGreedy,
}

/// One driver to spawn at scenario start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriverSpec {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub behaviour: DriverBehaviour,
}

/// One request queued to arrive at a fixed tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduledRequestSpec {
    pub creation_time: u64,
    pub pickup: (f64, f64),
    pub dropoff: (f64, f64),
}

/// Everything needed to build a simulation world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioParams {
    pub drivers: Vec<DriverSpec>,
    pub dispatch_policy: DispatchPolicyKind,
    /// Expected stochastic arrivals per tick; 0.0 disables them.
    pub request_rate: f64,
    pub scheduled_requests: Vec<ScheduledRequestSpec>,
    pub timeout: u64,
    pub base_fee: f64,
    pub distance_fee: f64,
    pub mutation_thresholds: MutationThresholds,
    pub seed: u64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            drivers: Vec::new(),
            dispatch_policy: DispatchPolicyKind::NearestNeighbor { k: 3 },
            request_rate: 0.5,
            scheduled_requests: Vec::new(),
            timeout: 20,
            base_fee: DEFAULT_BASE_FEE,
            distance_fee: DEFAULT_DISTANCE_FEE,
            mutation_thresholds: MutationThresholds::default(),
            seed: 42,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_dispatch_policy(mut self, kind: DispatchPolicyKind) -> Self {
        self.dispatch_policy = kind;
        self
    }

    pub fn with_request_rate(mut self, rate: f64) -> Self {
        self.request_rate = rate;
        self
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fees(mut self, base_fee: f64, distance_fee: f64) -> Self {
        self.base_fee = base_fee;
        self.distance_fee = distance_fee;
        self
    }
}
