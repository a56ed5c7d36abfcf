//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::follow_up::OverdueThresholds;
use crate::repository::DEFAULT_STORAGE_KEY;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the terminal front end.
pub struct AppConfig {
    /// Directory holding the client slot file.
    pub storage_dir: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Glob matching the output templates.
    pub templates_dir: String,
    #[serde(default = "default_warning_days")]
    pub overdue_warning_days: i64,
    #[serde(default = "default_danger_days")]
    pub overdue_danger_days: i64,
}

impl AppConfig {
    pub fn thresholds(&self) -> OverdueThresholds {
        OverdueThresholds::new(self.overdue_warning_days, self.overdue_danger_days)
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_warning_days() -> i64 {
    OverdueThresholds::default().warning_days
}

fn default_danger_days() -> i64 {
    OverdueThresholds::default().danger_days
}
