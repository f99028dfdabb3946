use serde::Deserialize;

pub const SAFETY_MARGIN_SECONDS_DEFAULT: u64 = 120;
pub const REFRESH_INTERVAL_SECONDS_DEFAULT: u64 = 60;
pub const HTTP_TIMEOUT_SECONDS_DEFAULT: u64 = 30;

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    /// minimum remaining lifetime of a cached token before it is treated as unusable
    /// invariant: > refresh_interval_seconds
    pub safety_margin_seconds: Option<u64>,
    /// period of the background revalidation task
    pub refresh_interval_seconds: Option<u64>,
    /// upper bound for every outbound call (auth endpoint and orders API)
    pub http_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>
}

impl SettingsConfig {
    pub fn safety_margin_seconds(&self) -> u64 {
        self.safety_margin_seconds.unwrap_or(SAFETY_MARGIN_SECONDS_DEFAULT)
    }

    pub fn refresh_interval_seconds(&self) -> u64 {
        self.refresh_interval_seconds.unwrap_or(REFRESH_INTERVAL_SECONDS_DEFAULT)
    }

    pub fn http_timeout_seconds(&self) -> u64 {
        self.http_timeout_seconds.unwrap_or(HTTP_TIMEOUT_SECONDS_DEFAULT)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default = "default_metrics_enabled")]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { path: default_metrics_path(), is_enabled: default_metrics_enabled() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: String
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_server_host(), port: default_server_port() }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> String {
    "8888".to_string()
}
