//! Telemetry and snapshots: run counters and read-only state projections.

use bevy_ecs::prelude::{Resource, World};
use serde::Serialize;

use crate::clock::SimulationClock;
use crate::ecs::{Driver, DriverState, Position, Request, RequestState};

/// Aggregate counters and wait-time samples for a run.
#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub served_count: u64,
    pub expired_count: u64,
    /// Creation-to-delivery ticks, one sample per served request.
    pub wait_times: Vec<u64>,
}

impl SimTelemetry {
    pub fn record_delivery(&mut self, wait: u64) {
        self.served_count += 1;
        self.wait_times.push(wait);
    }

    pub fn record_expiry(&mut self) {
        self.expired_count += 1;
    }

    /// Arithmetic mean of the wait samples; 0.0 before the first delivery.
    pub fn avg_wait(&self) -> f64 {
        if self.wait_times.is_empty() {
            return 0.0;
        }
        self.wait_times.iter().sum::<u64>() as f64 / self.wait_times.len() as f64
    }
}

/// Display row for one driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSnapshot {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub status: DriverState,
    pub earnings: f64,
}

/// Display row for one active request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestSnapshot {
    pub id: u64,
    pub status: RequestState,
    pub pickup: (f64, f64),
    pub dropoff: (f64, f64),
}

/// Read-only projection of the simulation state between ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub time: u64,
    pub served_count: u64,
    pub expired_count: u64,
    pub avg_wait: f64,
    pub drivers: Vec<DriverSnapshot>,
    pub active_requests: Vec<RequestSnapshot>,
}

/// Project the world into a snapshot. Observes only; rows are sorted by
/// id, so two captures without an intervening tick are identical.
pub fn capture_snapshot(world: &mut World) -> SimSnapshot {
    let time = world.resource::<SimulationClock>().now();
    let (served_count, expired_count, avg_wait) = {
        let telemetry = world.resource::<SimTelemetry>();
        (
            telemetry.served_count,
            telemetry.expired_count,
            telemetry.avg_wait(),
        )
    };

    let mut driver_query = world.query::<(&Driver, &Position)>();
    let mut drivers: Vec<DriverSnapshot> = driver_query
        .iter(world)
        .map(|(driver, position)| DriverSnapshot {
            id: driver.id,
            x: position.0.x(),
            y: position.0.y(),
            status: driver.state,
            earnings: driver.total_earnings,
        })
        .collect();
    drivers.sort_by_key(|row| row.id);

    let mut request_query = world.query::<&Request>();
    let mut active_requests: Vec<RequestSnapshot> = request_query
        .iter(world)
        .filter(|request| request.is_active())
        .map(|request| RequestSnapshot {
            id: request.id,
            status: request.state,
            pickup: (request.pickup.x(), request.pickup.y()),
            dropoff: (request.dropoff.x(), request.dropoff.y()),
        })
        .collect();
    active_requests.sort_by_key(|row| row.id);

    SimSnapshot {
        time,
        served_count,
        expired_count,
        avg_wait,
        drivers,
        active_requests,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn avg_wait_is_zero_without_samples() {
        let telemetry = SimTelemetry::default();
        assert_relative_eq!(telemetry.avg_wait(), 0.0);
    }

    #[test]
    fn avg_wait_is_the_arithmetic_mean() {
        let mut telemetry = SimTelemetry::default();
        telemetry.record_delivery(1);
        telemetry.record_delivery(2);
        telemetry.record_delivery(3);
        assert_eq!(telemetry.served_count, 3);
        assert_relative_eq!(telemetry.avg_wait(), 2.0);
    }

    #[test]
    fn expiries_only_touch_the_expired_counter() {
        let mut telemetry = SimTelemetry::default();
        telemetry.record_expiry();
        telemetry.record_expiry();
        assert_eq!(telemetry.expired_count, 2);
        assert_eq!(telemetry.served_count, 0);
        assert!(telemetry.wait_times.is_empty());
    }
}
