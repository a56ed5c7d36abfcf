//! DTO modules that bridge services with templates.

pub mod client;
pub mod main;
