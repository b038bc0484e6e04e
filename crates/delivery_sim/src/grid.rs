//! Grid geometry: bounded 2D points and distance helpers.

use serde::Serialize;

use crate::error::SimError;

/// Width of the simulation grid (max x coordinate).
pub const GRID_WIDTH: f64 = 50.0;

/// Height of the simulation grid (max y coordinate).
pub const GRID_HEIGHT: f64 = 30.0;

/// Absolute tolerance for "arrived at target" position comparisons.
/// Positions drift by rounding while stepping, so exact float equality
/// would falsely report a driver as short of its target.
pub const POSITION_EPSILON: f64 = 1e-9;

/// A point inside the simulation grid.
///
/// Construction is validated; every `Point` in the system satisfies
/// `0 <= x <= GRID_WIDTH` and `0 <= y <= GRID_HEIGHT`. Value type:
/// copied, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, SimError> {
        let in_bounds = x.is_finite()
            && y.is_finite()
            && (0.0..=GRID_WIDTH).contains(&x)
            && (0.0..=GRID_HEIGHT).contains(&y);
        if !in_bounds {
            return Err(SimError::InvalidCoordinate {
                x,
                y,
                width: GRID_WIDTH,
                height: GRID_HEIGHT,
            });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Tolerance-based position equality (absolute epsilon per axis).
    pub fn is_close_to(&self, other: Point) -> bool {
        (self.x - other.x).abs() <= POSITION_EPSILON && (self.y - other.y).abs() <= POSITION_EPSILON
    }

    /// Move up to `max_move` along the straight line toward `target`.
    ///
    /// Snaps onto `target` when it is within reach; otherwise advances by
    /// `max_move` along the unit direction vector. The result stays on the
    /// segment between two valid points, so it stays inside the grid.
    pub fn step_toward(&self, target: Point, max_move: f64) -> Point {
        let distance = self.distance_to(target);
        if distance <= max_move {
            return target;
        }
        let nx = (target.x - self.x) / distance;
        let ny = (target.y - self.y) / distance;
        Point {
            x: self.x + nx * max_move,
            y: self.y + ny * max_move,
        }
    }
}
