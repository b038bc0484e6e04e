//! Performance benchmarks for delivery_sim using Criterion.rs.

use bevy_ecs::prelude::{Entity, World};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use delivery_sim::behaviour::DriverBehaviour;
use delivery_sim::dispatch::{
    DispatchPolicy, DriverView, GlobalGreedyPolicy, NearestNeighborPolicy, RequestView,
};
use delivery_sim::grid::Point;
use delivery_sim::runner::{run_ticks, simulation_schedule};
use delivery_sim::scenario::{build_scenario, DriverSpec, ScenarioParams};

fn fleet(count: u32) -> Vec<DriverSpec> {
    (0..count)
        .map(|id| DriverSpec {
            id,
            x: f64::from(id % 50),
            y: f64::from(id % 30),
            speed: 1.0 + f64::from(id % 3),
            behaviour: match id % 4 {
                0 => DriverBehaviour::Naive,
                1 => DriverBehaviour::greedy_distance(),
                2 => DriverBehaviour::earnings_max(),
                _ => DriverBehaviour::lazy(),
            },
        })
        .collect()
}

fn bench_simulation_run(c: &mut Criterion) {
    let scenarios = vec![("small", 10, 0.5), ("medium", 50, 2.0), ("large", 200, 5.0)];

    let mut group = c.benchmark_group("simulation_run");
    for (name, drivers, rate) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(drivers, rate),
            |b, &(drivers, rate)| {
                b.iter(|| {
                    let mut world = World::new();
                    let params = ScenarioParams {
                        drivers: fleet(drivers),
                        request_rate: rate,
                        ..ScenarioParams::default()
                    }
                    .with_seed(42);
                    build_scenario(&mut world, params).expect("scenario");
                    let mut schedule = simulation_schedule();
                    run_ticks(&mut world, &mut schedule, 1_000);
                    black_box(world);
                });
            },
        );
    }
    group.finish();
}

fn bench_dispatch_policies(c: &mut Criterion) {
    let drivers: Vec<DriverView> = (0..100)
        .map(|id| DriverView {
            entity: Entity::from_raw(id),
            id,
            position: Point::new(f64::from(id % 50), f64::from(id % 30)).expect("point"),
            speed: 1.0,
        })
        .collect();
    let requests: Vec<RequestView> = (0..50)
        .map(|id| RequestView {
            entity: Entity::from_raw(1_000 + id),
            id: u64::from(id),
            pickup: Point::new(f64::from((id * 7) % 50), f64::from((id * 3) % 30)).expect("point"),
            dropoff: Point::new(f64::from((id * 11) % 50), f64::from((id * 5) % 30))
                .expect("point"),
        })
        .collect();

    let mut group = c.benchmark_group("dispatch_policies");

    let nearest = NearestNeighborPolicy::new(3);
    group.bench_function("nearest_neighbor_100x50", |b| {
        b.iter(|| black_box(nearest.assign(&drivers, &requests, 0)));
    });

    let greedy = GlobalGreedyPolicy;
    group.bench_function("global_greedy_100x50", |b| {
        b.iter(|| black_box(greedy.assign(&drivers, &requests, 0)));
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_run, bench_dispatch_policies);
criterion_main!(benches);
