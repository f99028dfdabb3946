use serde::Deserialize;

use crate::config::credentials::PaypalConfig;
use crate::config::settings::SettingsConfig;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub paypal: PaypalConfig,
}

/// Used when no config file is given: everything comes from the environment.
pub const DEFAULT_CONFIG_YAML: &str = r#"
settings:
  safety_margin_seconds: 120
  refresh_interval_seconds: 60
  http_timeout_seconds: 30
  server:
    host: "${HOST:0.0.0.0}"
    port: "${PORT:8888}"
  metrics:
    is_enabled: true
    path: /metrics
paypal:
  base_url: "${BASE_URL:https://api-m.sandbox.paypal.com}"
  client_id: "${PAYPAL_CLIENT_ID}"
  client_secret: "${PAYPAL_CLIENT_SECRET}"
"#;
