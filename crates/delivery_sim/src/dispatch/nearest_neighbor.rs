use std::cmp::Ordering;

use super::policy::DispatchPolicy;
use super::types::{DriverView, Offer, RequestView, SPEED_FLOOR};

/// Offer each waiting request to its k nearest idle drivers.
///
/// Every request is ranked independently, so a close driver can collect
/// offers for several requests in one tick. Distance ties keep the input
/// (id) order via stable sorting.
#[derive(Debug, Clone, Copy)]
pub struct NearestNeighborPolicy {
    k: usize,
}

impl NearestNeighborPolicy {
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }
}

impl DispatchPolicy for NearestNeighborPolicy {
    fn assign(&self, drivers: &[DriverView], requests: &[RequestView], _time: u64) -> Vec<Offer> {
        let mut offers = Vec::new();
        if drivers.is_empty() {
            return offers;
        }
        for request in requests {
            let mut ranked: Vec<(f64, &DriverView)> = drivers
                .iter()
                .map(|driver| (driver.position.distance_to(request.pickup), driver))
                .collect();
            ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            for (distance, driver) in ranked.into_iter().take(self.k) {
                offers.push(Offer {
                    driver: driver.entity,
                    request: request.entity,
                    estimated_travel_time: distance / driver.speed.max(SPEED_FLOOR),
                    estimated_reward: 0.0,
                });
            }
        }
        offers
    }
}
