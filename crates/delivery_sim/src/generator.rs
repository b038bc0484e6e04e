//! Request sources: produce new delivery requests per tick.
//!
//! The engine is the sole consumer; a source is the sole producer of new
//! requests and of their ids, which are unique and strictly increasing
//! across a run.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::Request;
use crate::grid::{Point, GRID_HEIGHT, GRID_WIDTH};

/// A request source yields the requests that arrive at `time`.
pub trait RequestSource: Send + Sync {
    fn maybe_generate(&mut self, time: u64) -> Vec<Request>;
}

/// Resource wrapper for the request source trait object.
#[derive(Resource)]
pub struct RequestSourceResource(pub Box<dyn RequestSource>);

/// Poisson arrivals uniformly placed in the grid, combined with a
/// pre-scheduled queue.
///
/// Scheduled requests are emitted once, on the first tick at or past
/// their creation time (the clock starts at 0 and the first tick is 1, so
/// an exact-match rule would drop tick-0 schedules). Stochastic draws are
/// reseeded per tick from the configured seed, so runs are reproducible.
pub struct PoissonRequestSource {
    rate: f64,
    seed: u64,
    next_id: u64,
    scheduled: Vec<Request>,
}

impl PoissonRequestSource {
    pub fn new(rate: f64, seed: u64) -> Self {
        Self {
            rate: rate.max(0.0),
            seed,
            next_id: 1,
            scheduled: Vec::new(),
        }
    }

    /// Queue a request to appear at `creation_time`. Returns its id.
    pub fn schedule(&mut self, creation_time: u64, pickup: Point, dropoff: Point) -> u64 {
        let id = self.alloc_id();
        self.scheduled
            .push(Request::new(id, pickup, dropoff, creation_time));
        id
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RequestSource for PoissonRequestSource {
    fn maybe_generate(&mut self, time: u64) -> Vec<Request> {
        let mut due: Vec<Request> = Vec::new();
        let mut index = 0;
        while index < self.scheduled.len() {
            if self.scheduled[index].creation_time <= time {
                due.push(self.scheduled.remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by_key(|request| request.id);

        if self.rate > 0.0 {
            let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(time));
            let count = poisson_count(&mut rng, self.rate);
            for _ in 0..count {
                let pickup = random_point(&mut rng);
                let dropoff = random_point(&mut rng);
                let id = self.alloc_id();
                due.push(Request::new(id, pickup, dropoff, time));
            }
        }
        due
    }
}

/// Knuth's product method; fine for the per-tick rates used here.
fn poisson_count<R: Rng>(rng: &mut R, rate: f64) -> usize {
    let limit = (-rate).exp();
    let mut count = 0usize;
    let mut product = 1.0f64;
    loop {
        product *= rng.gen::<f64>();
        if product <= limit {
            break;
        }
        count += 1;
    }
    count
}

fn random_point<R: Rng>(rng: &mut R) -> Point {
    let x = rng.gen_range(0.0..=GRID_WIDTH);
    let y = rng.gen_range(0.0..=GRID_HEIGHT);
    Point::new(x, y).expect("sampled coordinates are inside the grid")
}
