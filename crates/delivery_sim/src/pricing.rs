//! Fare model for delivered requests.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::grid::Point;

/// Default flat fee credited per delivery.
pub const DEFAULT_BASE_FEE: f64 = 10.0;

/// Default fee per unit of pickup-to-dropoff distance.
pub const DEFAULT_DISTANCE_FEE: f64 = 1.0;

#[derive(Debug, Clone, Copy, Resource, Serialize, Deserialize)]
pub struct FareConfig {
    pub base_fee: f64,
    pub distance_fee: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            base_fee: DEFAULT_BASE_FEE,
            distance_fee: DEFAULT_DISTANCE_FEE,
        }
    }
}

impl FareConfig {
    /// `base_fee + distance_fee * pickup→dropoff distance`.
    pub fn trip_fare(&self, pickup: Point, dropoff: Point) -> f64 {
        self.base_fee + self.distance_fee * pickup.distance_to(dropoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fare_is_base_plus_distance() {
        let config = FareConfig {
            base_fee: 10.0,
            distance_fee: 2.0,
        };
        let pickup = Point::new(0.0, 0.0).expect("point");
        let dropoff = Point::new(3.0, 4.0).expect("point");
        assert_relative_eq!(config.trip_fare(pickup, dropoff), 20.0);
    }

    #[test]
    fn zero_length_trip_earns_the_base_fee() {
        let config = FareConfig::default();
        let spot = Point::new(5.0, 5.0).expect("point");
        assert_relative_eq!(config.trip_fare(spot, spot), DEFAULT_BASE_FEE);
    }
}
