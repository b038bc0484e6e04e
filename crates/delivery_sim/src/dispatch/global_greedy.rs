use std::cmp::Ordering;

use super::policy::DispatchPolicy;
use super::types::{DriverView, Offer, RequestView, SPEED_FLOOR};

/// Offer the full idle-driver x waiting-request cross product, sorted
/// ascending by pickup distance.
///
/// No deduplication happens here; the engine's conflict resolution keeps
/// the first accepted offer per request. Distance ties keep pair
/// discovery order (driver-major) via stable sorting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalGreedyPolicy;

impl DispatchPolicy for GlobalGreedyPolicy {
    fn assign(&self, drivers: &[DriverView], requests: &[RequestView], _time: u64) -> Vec<Offer> {
        let mut pairs: Vec<(f64, &DriverView, &RequestView)> = Vec::new();
        for driver in drivers {
            for request in requests {
                pairs.push((driver.position.distance_to(request.pickup), driver, request));
            }
        }
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        pairs
            .into_iter()
            .map(|(distance, driver, request)| Offer {
                driver: driver.entity,
                request: request.entity,
                estimated_travel_time: distance / driver.speed.max(SPEED_FLOOR),
                estimated_reward: 0.0,
            })
            .collect()
    }
}
