use std::env;

use super::model::{CheckerConfig, Checks, parse_event};
use crate::error::ConfigError;

const DEFAULT_CONFIG_FILE: &str = "config.yml";
const DEFAULT_MIMIR_ENDPOINT: &str = "http://localhost:9009";

pub struct AppConfig {
    pub config: CheckerConfig,
    /// The checks of each invocation, taken from `EVENT_FILE` when set.
    pub checks: Checks,
    pub mimir_endpoint: String,
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })
}

/// Load the application configuration from a YAML file and environment variables.
/// The file is named by `CONFIG_FILE` (default `config.yml`). When `EVENT_FILE` is
/// set, the JSON event in that file replaces the `checks` of the YAML file.
/// The metrics endpoint comes from `MIMIR_ENDPOINT`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file_location =
        env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let config_str = read_file(&config_file_location)?;
    let config: CheckerConfig =
        serde_yaml::from_str(&config_str).map_err(|source| ConfigError::Yaml {
            path: config_file_location.clone(),
            source,
        })?;

    let checks = match env::var("EVENT_FILE") {
        Ok(event_file) => {
            log::info!("Using check event from {}", event_file);
            parse_event(&read_file(&event_file)?)?
        }
        Err(_) => config.checks.clone(),
    };

    let mimir_endpoint =
        env::var("MIMIR_ENDPOINT").unwrap_or_else(|_| DEFAULT_MIMIR_ENDPOINT.to_string());

    Ok(AppConfig {
        config,
        checks,
        mimir_endpoint,
    })
}
