use std::path::Path;
use anyhow::{anyhow, Result};

use crate::config::proc_loader::{env_to_config, file_to_config};
use crate::config::types::ServiceConfig;

/// YAML file when given, otherwise the built-in environment-driven config.
pub async fn run(config_path: Option<&str>) -> Result<ServiceConfig> {
    match config_path {
        Some(config_path) => file_to_config(Path::new(config_path))
            .await
            .map_err(|e| anyhow!("Invalid config {}: {}", config_path, e)),
        None => env_to_config().await,
    }
}
