//! Single-user CRM: clients with status tracking and follow-up reminders.
//!
//! The `data` feature carries the core (domain, store, derived views, forms
//! and services); the `cli` feature adds the terminal front end.

#[cfg(feature = "cli")]
use std::io;

#[cfg(feature = "cli")]
use crate::commands::Cli;
#[cfg(feature = "cli")]
use crate::models::config::AppConfig;

#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "cli")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod services;

/// Runs one command of the terminal front end against stdin/stdout.
#[cfg(feature = "cli")]
pub fn run(config: AppConfig, cli: Cli) -> io::Result<()> {
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    commands::execute(&config, cli, &mut input, &mut out)
        .map_err(|e| io::Error::other(format!("Command failed: {e}")))
}
