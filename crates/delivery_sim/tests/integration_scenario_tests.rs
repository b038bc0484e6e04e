mod support;

use approx::assert_relative_eq;

use delivery_sim::behaviour::DriverBehaviour;
use delivery_sim::ecs::{Driver, DriverState, Request, RequestState};
use delivery_sim::mutation::MutationThresholds;
use delivery_sim::scenario::{DispatchPolicyKind, ScenarioParams};
use delivery_sim::simulation::DeliverySimulation;
use support::world::{driver, neutral_thresholds, scheduled, scripted_scenario};

#[test]
fn single_driver_serves_a_scheduled_request_end_to_end() {
    // Driver at the origin, speed 1; pickup 3 away, dropoff 4 further.
    let params = scripted_scenario(
        vec![driver(0, 0.0, 0.0, 1.0, DriverBehaviour::Naive)],
        vec![scheduled(0, (3.0, 0.0), (7.0, 0.0))],
        DispatchPolicyKind::NearestNeighbor { k: 1 },
        10,
    );
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(10).expect("run");

    let snapshot = sim.get_snapshot().expect("snapshot");
    assert_eq!(snapshot.served_count, 1);
    assert_eq!(snapshot.expired_count, 0);
    // assigned at tick 1, picked at tick 3, delivered at tick 7
    assert_relative_eq!(snapshot.avg_wait, 7.0);
    assert_relative_eq!(snapshot.drivers[0].earnings, 14.0);
    assert_eq!(snapshot.drivers[0].status, DriverState::Idle);
    assert!(snapshot.active_requests.is_empty());

    let request = sim.world_mut().query::<&Request>().single(sim.world());
    assert_eq!(request.state, RequestState::Delivered);
    assert_eq!(request.pickup_wait, 3);
    assert_eq!(request.delivery_wait, 4);
    assert_eq!(request.assigned_driver, Some(0));
}

#[test]
fn unserved_request_expires_after_the_timeout() {
    let params = scripted_scenario(
        Vec::new(),
        vec![scheduled(0, (1.0, 0.0), (2.0, 0.0))],
        DispatchPolicyKind::NearestNeighbor { k: 1 },
        3,
    );
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(4).expect("run");

    let snapshot = sim.get_snapshot().expect("snapshot");
    assert_eq!(snapshot.expired_count, 1);
    assert_eq!(snapshot.served_count, 0);
    assert!(snapshot.active_requests.is_empty());

    let request = sim.world_mut().query::<&Request>().single(sim.world());
    assert_eq!(request.state, RequestState::Expired);
    assert_eq!(request.expired_wait, 4);
}

#[test]
fn conflicting_drivers_resolve_to_the_closest_one() {
    let params = scripted_scenario(
        vec![
            driver(0, 0.0, 0.0, 1.0, DriverBehaviour::Naive),
            driver(1, 10.0, 0.0, 1.0, DriverBehaviour::Naive),
        ],
        vec![scheduled(0, (1.0, 0.0), (5.0, 0.0))],
        DispatchPolicyKind::GlobalGreedy,
        20,
    );
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.tick().expect("tick");

    let mut drivers: Vec<Driver> = sim
        .world_mut()
        .query::<&Driver>()
        .iter(sim.world())
        .cloned()
        .collect();
    drivers.sort_by_key(|d| d.id);

    assert_ne!(drivers[0].state, DriverState::Idle);
    assert!(drivers[0].current_request.is_some());
    assert_eq!(drivers[1].state, DriverState::Idle);
    assert_eq!(drivers[1].current_request, None);

    let request = sim.world_mut().query::<&Request>().single(sim.world());
    assert_eq!(request.assigned_driver, Some(0));
}

#[test]
fn snapshot_is_idempotent_between_ticks() {
    let params = ScenarioParams {
        drivers: vec![
            driver(0, 5.0, 5.0, 1.0, DriverBehaviour::Naive),
            driver(1, 40.0, 20.0, 2.0, DriverBehaviour::earnings_max()),
        ],
        request_rate: 1.0,
        ..ScenarioParams::default()
    };
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(5).expect("run");

    let first = sim.get_snapshot().expect("snapshot");
    let second = sim.get_snapshot().expect("snapshot");
    assert_eq!(first, second);
}

#[test]
fn overdue_driver_gets_a_fresh_random_behaviour() {
    // No flags can trip, so only the time trigger fires: at tick 10 the
    // driver mutates and the stamp moves to 10.
    let params = ScenarioParams {
        drivers: vec![driver(0, 5.0, 5.0, 1.0, DriverBehaviour::Naive)],
        request_rate: 0.0,
        mutation_thresholds: MutationThresholds {
            max_time_since_mutation: 10,
            max_expired_count: 1_000_000,
            min_earnings_ratio: 0.0,
            min_accepted_ratio: 0.0,
        },
        ..ScenarioParams::default()
    };
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(9).expect("run");
    {
        let driver = sim.world_mut().query::<&Driver>().single(sim.world());
        assert_eq!(driver.behaviour_mutation_stamp, 0);
    }

    sim.tick().expect("tick");
    let driver = sim.world_mut().query::<&Driver>().single(sim.world());
    assert_eq!(driver.behaviour_mutation_stamp, 10);
}

#[test]
fn lazy_driver_accepts_once_idle_long_enough() {
    // Lazy(close 5, idle >= 6): request appears nearby at tick 8; by then
    // the driver has idled past the threshold and takes it.
    let params = scripted_scenario(
        vec![driver(0, 0.0, 0.0, 1.0, DriverBehaviour::lazy())],
        vec![scheduled(8, (2.0, 0.0), (6.0, 0.0))],
        DispatchPolicyKind::NearestNeighbor { k: 1 },
        30,
    );
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(8).expect("run");

    let driver = sim.world_mut().query::<&Driver>().single(sim.world());
    assert_eq!(driver.state, DriverState::ToPickup);
}

#[test]
fn lazy_driver_declines_while_fresh() {
    // Same shape, but the request arrives on tick 1 when the driver has
    // idled for only one tick; the offer is declined and the request
    // eventually expires.
    let params = scripted_scenario(
        vec![driver(0, 0.0, 0.0, 1.0, DriverBehaviour::lazy())],
        vec![scheduled(0, (2.0, 0.0), (6.0, 0.0))],
        DispatchPolicyKind::NearestNeighbor { k: 1 },
        2,
    );
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(3).expect("run");

    let snapshot = sim.get_snapshot().expect("snapshot");
    assert_eq!(snapshot.served_count, 0);
    assert_eq!(snapshot.expired_count, 1);
    let driver = sim.world_mut().query::<&Driver>().single(sim.world());
    assert_eq!(driver.state, DriverState::Idle);
}

#[test]
fn neutral_thresholds_do_not_mutate_anyone() {
    let params = ScenarioParams {
        drivers: vec![driver(0, 5.0, 5.0, 1.0, DriverBehaviour::Naive)],
        request_rate: 0.0,
        mutation_thresholds: neutral_thresholds(),
        ..ScenarioParams::default()
    };
    let mut sim = DeliverySimulation::new(params).expect("scenario");
    sim.run(50).expect("run");

    let driver = sim.world_mut().query::<&Driver>().single(sim.world());
    assert_eq!(driver.behaviour, DriverBehaviour::Naive);
    assert_eq!(driver.behaviour_mutation_stamp, 0);
}
