pub mod global_greedy;
pub mod nearest_neighbor;
pub mod policy;
pub mod types;

use bevy_ecs::prelude::Resource;

pub use global_greedy::GlobalGreedyPolicy;
pub use nearest_neighbor::NearestNeighborPolicy;
pub use policy::DispatchPolicy;
pub use types::{DriverView, Offer, RequestView};

/// Resource wrapper for the dispatch policy trait object.
#[derive(Resource)]
pub struct DispatchPolicyResource(pub Box<dyn DispatchPolicy>);

impl DispatchPolicyResource {
    pub fn new(policy: Box<dyn DispatchPolicy>) -> Self {
        Self(policy)
    }
}

impl std::ops::Deref for DispatchPolicyResource {
    type Target = dyn DispatchPolicy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
