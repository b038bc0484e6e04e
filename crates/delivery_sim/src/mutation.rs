//! Behaviour mutation: periodic reassignment of a driver's acceptance
//! strategy based on its recent outcome history.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::behaviour::DriverBehaviour;
use crate::ecs::{Driver, HistoryEventKind};

/// Thresholds steering the decision-tree mutation rule.
#[derive(Debug, Clone, Copy, Resource, Serialize, Deserialize)]
pub struct MutationThresholds {
    /// Ticks since the last mutation after which a fresh random behaviour
    /// is forced regardless of history.
    pub max_time_since_mutation: u64,
    /// Expired-request count at which the expiry flag trips.
    pub max_expired_count: usize,
    /// Earnings-per-tick floor below which the earnings flag trips.
    pub min_earnings_ratio: f64,
    /// Accepted-requests-per-tick floor below which the acceptance flag trips.
    pub min_accepted_ratio: f64,
}

impl Default for MutationThresholds {
    fn default() -> Self {
        Self {
            max_time_since_mutation: 30,
            max_expired_count: 3,
            min_earnings_ratio: 0.25,
            min_accepted_ratio: 0.05,
        }
    }
}

/// A mutation rule may swap a driver's behaviour and restart its
/// mutation window.
pub trait MutationRule: Send + Sync {
    fn maybe_mutate(&self, driver: &mut Driver, time: u64);
}

/// Resource wrapper for the mutation rule trait object.
#[derive(Resource)]
pub struct MutationRuleResource(pub Box<dyn MutationRule>);

impl std::ops::Deref for MutationRuleResource {
    type Target = dyn MutationRule;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Rule-based mutation over three performance flags.
///
/// A driver overdue for mutation gets a uniformly random behaviour.
/// Otherwise the history since the last mutation is condensed into three
/// flags (too many expiries, earning too little, accepting too little)
/// and a fixed table picks the replacement, preferring a behaviour
/// different from the current one; multi-flag combinations fall back
/// toward random choices.
#[derive(Debug, Clone)]
pub struct DecisionTreeRule {
    thresholds: MutationThresholds,
    seed: u64,
}

impl DecisionTreeRule {
    pub fn new(thresholds: MutationThresholds, seed: u64) -> Self {
        Self { thresholds, seed }
    }

    fn random_behaviour(&self, driver_id: u32, time: u64) -> DriverBehaviour {
        let mut rng =
            StdRng::seed_from_u64(self.seed.wrapping_add(u64::from(driver_id)).wrapping_add(time));
        match rng.gen_range(0..4) {
            0 => DriverBehaviour::greedy_distance(),
            1 => DriverBehaviour::earnings_max(),
            2 => DriverBehaviour::lazy(),
            _ => DriverBehaviour::Naive,
        }
    }
}

impl MutationRule for DecisionTreeRule {
    fn maybe_mutate(&self, driver: &mut Driver, time: u64) {
        let since = time.saturating_sub(driver.behaviour_mutation_stamp);
        if since >= self.thresholds.max_time_since_mutation {
            driver.mutate_behaviour(self.random_behaviour(driver.id, time), time);
            return;
        }
        if since == 0 {
            // zero-length window: nothing can have been logged yet
            return;
        }

        let mut expired = 0usize;
        let mut accepted = 0usize;
        let mut earnings = 0.0f64;
        for event in driver.events_since_mutation() {
            match event.kind {
                HistoryEventKind::Expired => expired += 1,
                HistoryEventKind::Assigned => accepted += 1,
                HistoryEventKind::Delivered => earnings += event.earnings.unwrap_or(0.0),
                HistoryEventKind::Picked => {}
            }
        }

        let window = since as f64;
        let too_many_expired = expired >= self.thresholds.max_expired_count;
        let earning_too_little = earnings / window < self.thresholds.min_earnings_ratio;
        let accepting_too_little = (accepted as f64) / window < self.thresholds.min_accepted_ratio;

        let current = driver.behaviour;
        let next = match (too_many_expired, earning_too_little, accepting_too_little) {
            (false, false, false) => return,
            (true, false, false) => {
                if matches!(current, DriverBehaviour::GreedyDistance { .. }) {
                    DriverBehaviour::lazy()
                } else {
                    DriverBehaviour::greedy_distance()
                }
            }
            (false, true, false) => {
                if matches!(current, DriverBehaviour::EarningsMax { .. }) {
                    DriverBehaviour::greedy_distance()
                } else {
                    DriverBehaviour::earnings_max()
                }
            }
            (false, false, true) => {
                if matches!(current, DriverBehaviour::Naive) {
                    DriverBehaviour::earnings_max()
                } else {
                    DriverBehaviour::Naive
                }
            }
            (true, true, false) => {
                if matches!(current, DriverBehaviour::GreedyDistance { .. }) {
                    self.random_behaviour(driver.id, time)
                } else {
                    DriverBehaviour::greedy_distance()
                }
            }
            (false, true, true) => {
                if matches!(current, DriverBehaviour::EarningsMax { .. }) {
                    DriverBehaviour::Naive
                } else {
                    DriverBehaviour::earnings_max()
                }
            }
            (true, false, true) => {
                if matches!(current, DriverBehaviour::Lazy { .. }) {
                    self.random_behaviour(driver.id, time)
                } else {
                    DriverBehaviour::lazy()
                }
            }
            (true, true, true) => self.random_behaviour(driver.id, time),
        };
        driver.mutate_behaviour(next, time);
    }
}
