use super::types::{DriverView, Offer, RequestView};

/// A dispatch policy proposes (driver, request) offers each tick.
///
/// Policies see read-only views of the idle drivers and waiting requests,
/// in stable id order, and must not mutate simulation state. Offers may
/// be many-to-many: the same request may go to several drivers and one
/// driver may receive offers for several requests in the same tick; the
/// engine resolves conflicts after driver acceptance.
pub trait DispatchPolicy: Send + Sync {
    fn assign(&self, drivers: &[DriverView], requests: &[RequestView], time: u64) -> Vec<Offer>;
}
