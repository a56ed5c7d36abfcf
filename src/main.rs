use std::env;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;

use crm_followup::commands::Cli;
use crm_followup::models::config::AppConfig;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let app_config = match settings.try_deserialize::<AppConfig>() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading app config: {err}");
            std::process::exit(1);
        }
    };

    if app_config.overdue_warning_days > app_config.overdue_danger_days {
        log::warn!(
            "Warning threshold ({} days) exceeds danger threshold ({} days)",
            app_config.overdue_warning_days,
            app_config.overdue_danger_days
        );
    }

    if let Err(err) = crm_followup::run(app_config, cli) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
