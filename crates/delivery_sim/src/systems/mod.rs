pub mod behaviour_mutation;
pub mod dispatch;
pub mod movement;
pub mod request_expiry;
pub mod request_inbound;
