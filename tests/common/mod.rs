#![allow(dead_code)]

use std::io::Cursor;

use clap::Parser;
use tempfile::TempDir;

use crm_followup::commands::{Cli, CommandError, execute};
use crm_followup::domain::client::Client;
use crm_followup::models::config::AppConfig;
use crm_followup::repository::{DEFAULT_STORAGE_KEY, FileSlotStorage, load_clients};

/// Scratch data directory removed when the value is dropped.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn storage(&self) -> FileSlotStorage {
        FileSlotStorage::new(self.dir.path())
    }

    pub fn slot_path(&self) -> std::path::PathBuf {
        self.dir.path().join(format!("{DEFAULT_STORAGE_KEY}.json"))
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            storage_dir: self.dir.path().to_string_lossy().into_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*").to_string(),
            overdue_warning_days: 7,
            overdue_danger_days: 14,
        }
    }

    /// Runs the front end with `args`, feeding `input` to stdin. Returns the
    /// outcome and everything written to stdout.
    pub fn run(&self, args: &[&str], input: &str) -> (Result<(), CommandError>, String) {
        let cli = Cli::try_parse_from(std::iter::once("crm-followup").chain(args.iter().copied()))
            .expect("valid arguments");
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = execute(&self.config(), cli, &mut input, &mut out);
        (result, String::from_utf8(out).expect("utf-8 output"))
    }

    pub fn clients(&self) -> Vec<Client> {
        load_clients(&self.storage(), DEFAULT_STORAGE_KEY)
    }
}
