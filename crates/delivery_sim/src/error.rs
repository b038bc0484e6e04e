use thiserror::Error;

use crate::ecs::{DriverState, RequestState};

/// Errors surfaced by entity construction and lifecycle transitions.
///
/// Invariant violations propagate to the caller instead of silently
/// correcting state; engine systems only invoke transitions behind
/// precondition guards, so an `Err` reaching a system is a logic error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    InvalidCoordinate {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("request {id}: cannot {action} in state {state:?}")]
    InvalidRequestState {
        id: u64,
        state: RequestState,
        action: &'static str,
    },

    #[error("driver {id}: cannot {action} in state {state:?}")]
    InvalidDriverState {
        id: u32,
        state: DriverState,
        action: &'static str,
    },

    #[error("simulation is not initialized: missing {missing}")]
    NotInitialized { missing: &'static str },
}
