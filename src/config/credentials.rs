use std::fmt;

use serde::Deserialize;

/// ================================
/// PayPal account block
/// ================================
/// Raw values after `${VAR}` expansion. Empty strings mean "not provided".
#[derive(Debug, Deserialize, Clone)]
pub struct PaypalConfig {
    pub base_url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

/// Client-credentials pair, fixed for the process lifetime.
#[derive(Clone, Default)]
pub struct Credential {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Credential {
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id: client_id.filter(|v| !v.trim().is_empty()),
            client_secret: client_secret.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Both halves, or None when either is absent.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pair().is_some()
    }
}

impl From<&PaypalConfig> for Credential {
    fn from(cfg: &PaypalConfig) -> Self {
        Credential::new(Some(cfg.client_id.to_owned()), Some(cfg.client_secret.to_owned()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .finish()
    }
}
