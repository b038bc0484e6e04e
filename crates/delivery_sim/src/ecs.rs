//! Core components: delivery requests, drivers, and their lifecycles.
//!
//! Requests and drivers are entities in the ECS world; each holds its own
//! state machine. Transitions return `SimError` when a precondition does
//! not hold so that callers fail loudly instead of corrupting state.
//! Terminal requests stay in the world for statistics.

use bevy_ecs::prelude::{Component, Entity};
use serde::{Deserialize, Serialize};

use crate::behaviour::DriverBehaviour;
use crate::error::SimError;
use crate::grid::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    Waiting,
    Assigned,
    Picked,
    Delivered,
    Expired,
}

/// One delivery order. Mutated only through the `mark_*` transitions,
/// which enforce the monotonic lifecycle
/// WAITING -> ASSIGNED -> PICKED -> DELIVERED, with WAITING/ASSIGNED
/// able to divert to EXPIRED.
#[derive(Debug, Clone, Component)]
pub struct Request {
    pub id: u64,
    pub pickup: Point,
    pub dropoff: Point,
    pub creation_time: u64,
    pub state: RequestState,
    /// Id of the driver that accepted the request; kept after terminal
    /// transitions for statistics.
    pub assigned_driver: Option<u32>,
    /// Ticks from creation to pickup; set by `mark_picked`.
    pub pickup_wait: u64,
    /// Ticks from pickup to delivery; set by `mark_delivered`.
    pub delivery_wait: u64,
    /// Ticks from creation to expiry; set by `mark_expired`.
    pub expired_wait: u64,
}

impl Request {
    pub fn new(id: u64, pickup: Point, dropoff: Point, creation_time: u64) -> Self {
        Self {
            id,
            pickup,
            dropoff,
            creation_time,
            state: RequestState::Waiting,
            assigned_driver: None,
            pickup_wait: 0,
            delivery_wait: 0,
            expired_wait: 0,
        }
    }

    /// True while the request still needs work (not delivered or expired).
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            RequestState::Waiting | RequestState::Assigned | RequestState::Picked
        )
    }

    pub fn mark_assigned(&mut self, driver_id: u32) -> Result<(), SimError> {
        if self.state != RequestState::Waiting {
            return Err(SimError::InvalidRequestState {
                id: self.id,
                state: self.state,
                action: "mark_assigned",
            });
        }
        self.state = RequestState::Assigned;
        self.assigned_driver = Some(driver_id);
        Ok(())
    }

    pub fn mark_picked(&mut self, time: u64) -> Result<(), SimError> {
        if self.state != RequestState::Assigned {
            return Err(SimError::InvalidRequestState {
                id: self.id,
                state: self.state,
                action: "mark_picked",
            });
        }
        self.state = RequestState::Picked;
        self.pickup_wait = time.saturating_sub(self.creation_time);
        Ok(())
    }

    pub fn mark_delivered(&mut self, time: u64) -> Result<(), SimError> {
        if self.state != RequestState::Picked {
            return Err(SimError::InvalidRequestState {
                id: self.id,
                state: self.state,
                action: "mark_delivered",
            });
        }
        self.state = RequestState::Delivered;
        self.delivery_wait = time
            .saturating_sub(self.creation_time)
            .saturating_sub(self.pickup_wait);
        Ok(())
    }

    /// Picked requests are exempt: an order already in the courier's
    /// possession cannot expire.
    pub fn mark_expired(&mut self, time: u64) -> Result<(), SimError> {
        if !matches!(self.state, RequestState::Waiting | RequestState::Assigned) {
            return Err(SimError::InvalidRequestState {
                id: self.id,
                state: self.state,
                action: "mark_expired",
            });
        }
        self.state = RequestState::Expired;
        self.expired_wait = time.saturating_sub(self.creation_time);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    Idle,
    ToPickup,
    ToDropoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum HistoryEventKind {
    Assigned,
    Picked,
    Delivered,
    Expired,
}

/// Append-only log entry on a driver; immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistoryEvent {
    pub timestamp: u64,
    pub kind: HistoryEventKind,
    /// Label of the behaviour the driver ran under when the event occurred.
    pub behaviour: &'static str,
    pub request_id: Option<u64>,
    pub earnings: Option<f64>,
}

/// Grid position of a driver entity.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Position(pub Point);

/// One courier. `current_request` holds the entity of the request being
/// served; it is `Some` exactly while the driver is not idle.
#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub id: u32,
    pub speed: f64,
    pub state: DriverState,
    pub current_request: Option<Entity>,
    pub behaviour: DriverBehaviour,
    pub total_earnings: f64,
    /// Ticks since the driver last became idle.
    pub idle_time: u64,
    /// Tick at which the driver last became idle.
    pub idle_since: u64,
    /// Tick of the last behaviour mutation; history before this point is
    /// ignored by mutation rules.
    pub behaviour_mutation_stamp: u64,
    pub history: Vec<HistoryEvent>,
}

impl Driver {
    pub fn new(id: u32, speed: f64, behaviour: DriverBehaviour) -> Result<Self, SimError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SimError::InvalidDriverState {
                id,
                state: DriverState::Idle,
                action: "be created with non-positive speed",
            });
        }
        Ok(Self {
            id,
            speed,
            state: DriverState::Idle,
            current_request: None,
            behaviour,
            total_earnings: 0.0,
            idle_time: 0,
            idle_since: 0,
            behaviour_mutation_stamp: 0,
            history: Vec::new(),
        })
    }

    pub fn log_event(
        &mut self,
        timestamp: u64,
        kind: HistoryEventKind,
        request_id: Option<u64>,
        earnings: Option<f64>,
    ) {
        self.history.push(HistoryEvent {
            timestamp,
            kind,
            behaviour: self.behaviour.label(),
            request_id,
            earnings,
        });
    }

    /// History entries logged since the last behaviour mutation.
    pub fn events_since_mutation(&self) -> impl Iterator<Item = &HistoryEvent> {
        let stamp = self.behaviour_mutation_stamp;
        self.history.iter().filter(move |e| e.timestamp >= stamp)
    }

    /// Adopt a new behaviour and restart the mutation window at `time`.
    pub fn mutate_behaviour(&mut self, behaviour: DriverBehaviour, time: u64) {
        self.behaviour = behaviour;
        self.behaviour_mutation_stamp = time;
    }

    /// Delegate the acceptance decision for an offered trip to the
    /// driver's behaviour.
    pub fn decide(&self, position: Point, pickup: Point, dropoff: Point, time: u64) -> bool {
        self.behaviour.decide(self, position, pickup, dropoff, time)
    }

    /// Offer `request` to this driver. On acceptance the request becomes
    /// ASSIGNED and the driver heads for the pickup; on decline only the
    /// driver's idle-time bookkeeping is refreshed. Returns whether the
    /// offer was accepted.
    pub fn assign_request(
        &mut self,
        position: Point,
        request_entity: Entity,
        request: &mut Request,
        time: u64,
    ) -> Result<bool, SimError> {
        if self.state != DriverState::Idle {
            return Err(SimError::InvalidDriverState {
                id: self.id,
                state: self.state,
                action: "assign_request",
            });
        }
        if request.state != RequestState::Waiting {
            return Err(SimError::InvalidRequestState {
                id: request.id,
                state: request.state,
                action: "assign_request",
            });
        }
        if self.decide(position, request.pickup, request.dropoff, time) {
            request.mark_assigned(self.id)?;
            self.state = DriverState::ToPickup;
            self.current_request = Some(request_entity);
            self.log_event(time, HistoryEventKind::Assigned, Some(request.id), None);
            self.idle_time = 0;
            Ok(true)
        } else {
            self.idle_time = time.saturating_sub(self.idle_since);
            Ok(false)
        }
    }

    /// Complete the pickup if the driver is in the pickup phase and
    /// standing at the pickup point. Returns whether it completed.
    pub fn complete_pickup(
        &mut self,
        position: Point,
        request: &mut Request,
        time: u64,
    ) -> Result<bool, SimError> {
        if self.state != DriverState::ToPickup || !position.is_close_to(request.pickup) {
            return Ok(false);
        }
        request.mark_picked(time)?;
        self.state = DriverState::ToDropoff;
        self.log_event(time, HistoryEventKind::Picked, Some(request.id), None);
        Ok(true)
    }

    /// Complete the dropoff if the driver is in the dropoff phase and
    /// standing at the dropoff point: the request is delivered, `earnings`
    /// are credited, and the driver goes idle. Returns whether it completed.
    pub fn complete_dropoff(
        &mut self,
        position: Point,
        request: &mut Request,
        earnings: f64,
        time: u64,
    ) -> Result<bool, SimError> {
        if self.state != DriverState::ToDropoff || !position.is_close_to(request.dropoff) {
            return Ok(false);
        }
        request.mark_delivered(time)?;
        self.log_event(
            time,
            HistoryEventKind::Delivered,
            Some(request.id),
            Some(earnings),
        );
        self.total_earnings += earnings;
        self.current_request = None;
        self.state = DriverState::Idle;
        self.idle_since = time;
        self.idle_time = 0;
        Ok(true)
    }

    /// Release the driver after its assigned request expired before
    /// pickup: log the loss and return to the idle pool.
    pub fn release_expired(&mut self, request_id: u64, time: u64) {
        self.log_event(time, HistoryEventKind::Expired, Some(request_id), None);
        self.current_request = None;
        self.state = DriverState::Idle;
        self.idle_since = time;
        self.idle_time = 0;
    }
}
