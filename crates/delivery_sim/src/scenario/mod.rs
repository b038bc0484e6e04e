pub mod build;
pub mod params;

pub use build::build_scenario;
pub use params::{
    DispatchPolicyKind, DriverSpec, RequestTimeout, ScenarioParams, ScheduledRequestSpec,
};
