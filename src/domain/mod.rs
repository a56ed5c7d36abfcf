//! Domain aggregates and the follow-up views derived from them.

pub mod client;
pub mod follow_up;
pub mod types;
