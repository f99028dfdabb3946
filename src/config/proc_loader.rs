use std::{fs, path::Path};
use crate::config::settings::{LogFormat, LoggingConfig};
use crate::config::types::{ServiceConfig, DEFAULT_CONFIG_YAML};
use crate::config::proc_validator;
use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded).await
}

/// Built-in config, every value taken from the environment
pub async fn env_to_config() -> Result<ServiceConfig> {
    let expanded = expand_env_vars(DEFAULT_CONFIG_YAML)?;
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
        })?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::Compact));
    }
    if service_config.settings.safety_margin_seconds.is_none() {
        service_config.settings.safety_margin_seconds = Some(service_config.settings.safety_margin_seconds());
    }
    if service_config.settings.refresh_interval_seconds.is_none() {
        service_config.settings.refresh_interval_seconds = Some(service_config.settings.refresh_interval_seconds());
    }
    service_config.paypal.base_url = service_config.paypal.base_url.trim_end_matches('/').to_owned();

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config)
        .map_err(|errors| anyhow!("invalid config:\n  {}", errors.join("\n  ")))?;

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with environment values.
/// An unset variable without default becomes an empty string.
fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}")?;
    Ok(re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string())
}
