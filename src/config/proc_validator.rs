//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks timing invariants between the safety margin and the refresh interval
//! - Checks the PayPal base url and the server bind address
//!
//! Missing credentials are reported as a warning only: they fail individual calls,
//! not process start.

use reqwest::Url;
use tracing::{info, warn};

use crate::config::credentials::{Credential, PaypalConfig};
use crate::config::settings::SettingsConfig;
use crate::config::types::ServiceConfig;

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_paypal(&cfg.paypal, &mut errors);

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            warn!("config error: {}", e);
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    let margin = settings.safety_margin_seconds();
    let interval = settings.refresh_interval_seconds();

    if interval == 0 {
        errors.push("settings.refresh_interval_seconds must be > 0".to_string());
    }
    // a token has to survive at least one full refresh cycle inside the margin
    if margin <= interval {
        errors.push(format!(
            "settings.safety_margin_seconds ({}) must be greater than settings.refresh_interval_seconds ({})",
            margin, interval
        ));
    }
    if settings.http_timeout_seconds() == 0 {
        errors.push("settings.http_timeout_seconds must be > 0".to_string());
    }

    if settings.server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' is not a valid port",
            settings.server.port
        ));
    }

    if settings.metrics.is_enabled && !settings.metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            settings.metrics.path
        ));
    }

    if let Some(logging) = &settings.logging {
        let level = logging.level.to_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            errors.push(format!(
                "settings.logging.level '{}' must be one of trace, debug, info, warn, error",
                logging.level
            ));
        }
    }
}

fn validate_paypal(paypal: &PaypalConfig, errors: &mut Vec<String>) {
    match Url::parse(&paypal.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!(
            "paypal.base_url '{}' has unsupported scheme '{}'",
            paypal.base_url,
            url.scheme()
        )),
        Err(e) => errors.push(format!(
            "paypal.base_url '{}' is not an absolute url: {}",
            paypal.base_url, e
        )),
    }

    if !Credential::from(paypal).is_complete() {
        warn!("paypal.client_id / paypal.client_secret not set, every PayPal call will fail until provided");
    }
}
