//! Models describing external configuration.

pub mod config;
