//! Driver acceptance behaviours.
//!
//! A behaviour decides whether a driver takes an offered request. The set
//! is closed, so it is modeled as an enum rather than a trait object;
//! this keeps random behaviour selection in the mutation rule trivial.
//! `decide` is pure: it reads the driver and the offered trip and mutates
//! nothing.

use serde::{Deserialize, Serialize};

use crate::ecs::Driver;
use crate::grid::Point;

/// Default expiry window (ticks) GreedyDistance derives its range from.
pub const DEFAULT_EXPIRE_WINDOW: u64 = 20;

/// Default minimum earnings-per-tick ratio for EarningsMax.
pub const DEFAULT_MIN_RATIO: f64 = 0.3;

/// Default pickup radius Lazy considers "close".
pub const DEFAULT_CLOSE_RADIUS: f64 = 5.0;

/// Default idle ticks before Lazy starts accepting.
pub const DEFAULT_MAX_IDLE_TIME: u64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DriverBehaviour {
    /// Accepts pickups within a third of the reachable-before-expiry
    /// distance, and trips no longer than that distance.
    GreedyDistance { expire_window: u64, max_distance: f64 },
    /// Accepts when expected earnings per tick of travel clear `min_ratio`.
    EarningsMax { min_ratio: f64 },
    /// Accepts only close pickups, and only after idling long enough.
    Lazy {
        close_radius: f64,
        max_idle_time: u64,
    },
    /// Accepts everything.
    Naive,
}

impl DriverBehaviour {
    pub fn greedy_distance() -> Self {
        Self::GreedyDistance {
            expire_window: DEFAULT_EXPIRE_WINDOW,
            max_distance: 0.0,
        }
    }

    pub fn earnings_max() -> Self {
        Self::EarningsMax {
            min_ratio: DEFAULT_MIN_RATIO,
        }
    }

    pub fn lazy() -> Self {
        Self::Lazy {
            close_radius: DEFAULT_CLOSE_RADIUS,
            max_idle_time: DEFAULT_MAX_IDLE_TIME,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GreedyDistance { .. } => "greedy_distance",
            Self::EarningsMax { .. } => "earnings_max",
            Self::Lazy { .. } => "lazy",
            Self::Naive => "naive",
        }
    }

    /// Accept or decline a trip offered to `driver` standing at `position`.
    pub fn decide(
        &self,
        driver: &Driver,
        position: Point,
        pickup: Point,
        dropoff: Point,
        _time: u64,
    ) -> bool {
        match *self {
            Self::GreedyDistance {
                expire_window,
                max_distance,
            } => {
                // Unset max_distance falls back to how far this driver can
                // travel before a fresh request would expire.
                let max_distance = if max_distance > 0.0 {
                    max_distance
                } else {
                    driver.speed * expire_window as f64
                };
                let pickup_distance = position.distance_to(pickup);
                let trip_distance = pickup.distance_to(dropoff);
                pickup_distance <= max_distance / 3.0 && trip_distance <= max_distance
            }
            Self::EarningsMax { min_ratio } => {
                let total_distance = position.distance_to(pickup) + pickup.distance_to(dropoff);
                let expected_earning = 5.0 + ((total_distance - 5.0).max(0.0) / 5.0).floor();
                let trip_time = total_distance / driver.speed;
                if !trip_time.is_finite() || trip_time <= 0.0 {
                    return false;
                }
                expected_earning / trip_time >= min_ratio
            }
            Self::Lazy {
                close_radius,
                max_idle_time,
            } => {
                position.distance_to(pickup) <= close_radius && driver.idle_time >= max_idle_time
            }
            Self::Naive => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Driver;

    fn driver_with(speed: f64, behaviour: DriverBehaviour) -> Driver {
        Driver::new(1, speed, behaviour).expect("valid driver")
    }

    fn point(x: f64, y: f64) -> Point {
        Point::new(x, y).expect("test point inside grid")
    }

    #[test]
    fn naive_accepts_everything() {
        let driver = driver_with(1.0, DriverBehaviour::Naive);
        assert!(DriverBehaviour::Naive.decide(
            &driver,
            point(0.0, 0.0),
            point(49.0, 29.0),
            point(0.0, 29.0),
            0,
        ));
    }

    #[test]
    fn greedy_distance_derives_range_from_speed_and_window() {
        // speed 1.5 * window 20 = max 30; pickup cap is 10.
        let behaviour = DriverBehaviour::GreedyDistance {
            expire_window: 20,
            max_distance: 0.0,
        };
        let driver = driver_with(1.5, behaviour);
        assert!(behaviour.decide(&driver, point(0.0, 0.0), point(9.0, 0.0), point(20.0, 0.0), 0));
        // pickup too far
        assert!(!behaviour.decide(&driver, point(0.0, 0.0), point(11.0, 0.0), point(20.0, 0.0), 0));
        // trip too long
        assert!(!behaviour.decide(&driver, point(0.0, 0.0), point(9.0, 0.0), point(45.0, 0.0), 0));
    }

    #[test]
    fn greedy_distance_explicit_max_overrides_derivation() {
        let behaviour = DriverBehaviour::GreedyDistance {
            expire_window: 20,
            max_distance: 6.0,
        };
        let driver = driver_with(10.0, behaviour);
        // pickup cap is 2.0 despite the high speed
        assert!(behaviour.decide(&driver, point(0.0, 0.0), point(2.0, 0.0), point(5.0, 0.0), 0));
        assert!(!behaviour.decide(&driver, point(0.0, 0.0), point(3.0, 0.0), point(5.0, 0.0), 0));
    }

    #[test]
    fn earnings_max_accepts_profitable_trip() {
        // speed 2, pickup distance 1, trip distance 5: total 6,
        // expected 5 + floor(1/5) = 5, trip time 3, ratio 1.67.
        let behaviour = DriverBehaviour::EarningsMax { min_ratio: 0.3 };
        let driver = driver_with(2.0, behaviour);
        assert!(behaviour.decide(&driver, point(0.0, 0.0), point(1.0, 0.0), point(6.0, 0.0), 0));
    }

    #[test]
    fn earnings_max_rejects_below_ratio() {
        // speed 0.1: total 6, trip time 60, ratio 5/60 < 0.3.
        let behaviour = DriverBehaviour::EarningsMax { min_ratio: 0.3 };
        let driver = driver_with(0.1, behaviour);
        assert!(!behaviour.decide(&driver, point(0.0, 0.0), point(1.0, 0.0), point(6.0, 0.0), 0));
    }

    #[test]
    fn earnings_max_rejects_zero_length_trip() {
        let behaviour = DriverBehaviour::EarningsMax { min_ratio: 0.3 };
        let driver = driver_with(2.0, behaviour);
        let spot = point(5.0, 5.0);
        assert!(!behaviour.decide(&driver, spot, spot, spot, 0));
    }

    #[test]
    fn lazy_requires_both_proximity_and_idleness() {
        let behaviour = DriverBehaviour::Lazy {
            close_radius: 5.0,
            max_idle_time: 6,
        };
        let mut driver = driver_with(1.0, behaviour);
        // close but not idle long enough
        assert!(!behaviour.decide(&driver, point(0.0, 0.0), point(3.0, 0.0), point(8.0, 0.0), 10));
        driver.idle_time = 6;
        assert!(behaviour.decide(&driver, point(0.0, 0.0), point(3.0, 0.0), point(8.0, 0.0), 10));
        // idle long enough but pickup too far
        assert!(!behaviour.decide(&driver, point(0.0, 0.0), point(6.0, 0.0), point(8.0, 0.0), 10));
    }
}
