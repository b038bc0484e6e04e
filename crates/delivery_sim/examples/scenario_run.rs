//! Run a mixed-fleet scenario and print periodic snapshots.
//!
//! Run with: cargo run -p delivery_sim --example scenario_run

use delivery_sim::behaviour::DriverBehaviour;
use delivery_sim::scenario::{DispatchPolicyKind, DriverSpec, ScenarioParams};
use delivery_sim::simulation::DeliverySimulation;

const NUM_DRIVERS: u32 = 20;
const TOTAL_TICKS: u64 = 500;
const REPORT_EVERY: u64 = 100;

fn fleet() -> Vec<DriverSpec> {
    (0..NUM_DRIVERS)
        .map(|id| DriverSpec {
            id,
            x: f64::from((id * 13) % 50),
            y: f64::from((id * 7) % 30),
            speed: 1.0 + f64::from(id % 3) * 0.5,
            behaviour: match id % 4 {
                0 => DriverBehaviour::Naive,
                1 => DriverBehaviour::greedy_distance(),
                2 => DriverBehaviour::earnings_max(),
                _ => DriverBehaviour::lazy(),
            },
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let params = ScenarioParams {
        drivers: fleet(),
        dispatch_policy: DispatchPolicyKind::NearestNeighbor { k: 3 },
        request_rate: 1.5,
        timeout: 20,
        ..ScenarioParams::default()
    }
    .with_seed(123);

    let mut sim = DeliverySimulation::new(params).expect("scenario should build");

    println!(
        "--- Scenario run ({NUM_DRIVERS} drivers, rate 1.5, {TOTAL_TICKS} ticks, seed 123) ---"
    );
    for _ in 0..(TOTAL_TICKS / REPORT_EVERY) {
        sim.run(REPORT_EVERY).expect("engine resources present");
        let snapshot = sim.get_snapshot().expect("engine resources present");
        println!(
            "t={:4}  served={:4}  expired={:4}  avg_wait={:6.2}  active={:3}",
            snapshot.time,
            snapshot.served_count,
            snapshot.expired_count,
            snapshot.avg_wait,
            snapshot.active_requests.len(),
        );
    }

    let snapshot = sim.get_snapshot().expect("engine resources present");
    println!("\nDriver earnings:");
    for driver in &snapshot.drivers {
        println!(
            "  driver {:2}  {:8.2} at ({:5.1}, {:5.1})  {:?}",
            driver.id, driver.earnings, driver.x, driver.y, driver.status,
        );
    }
}
