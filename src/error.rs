use std::sync::Arc;

use thiserror::Error;

/// Failures of the token lifecycle and of authorized PayPal calls.
///
/// A downstream business status (any non-403 4xx/5xx) is not an error here:
/// it is returned to the caller together with its body.
///
/// Cloneable so that one failed acquisition can be handed to every caller
/// that was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("MISSING_API_CREDENTIALS: client id and client secret must both be configured")]
    CredentialsMissing,

    #[error("authentication endpoint rejected the request (status {status}): {error}: {description}")]
    AuthEndpoint {
        status: u16,
        error: String,
        description: String,
    },

    #[error("transport failure calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportFailure,
    },
}

#[derive(Debug, Clone, Error)]
pub enum TransportFailure {
    /// connection refused, timeout, broken body stream
    #[error(transparent)]
    Http(Arc<reqwest::Error>),
    #[error("malformed response body: {0}")]
    Body(Arc<serde_json::Error>),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        TransportFailure::Http(Arc::new(e))
    }
}

impl From<serde_json::Error> for TransportFailure {
    fn from(e: serde_json::Error) -> Self {
        TransportFailure::Body(Arc::new(e))
    }
}

impl GatewayError {
    pub fn transport(url: impl Into<String>, source: impl Into<TransportFailure>) -> Self {
        GatewayError::Transport { url: url.into(), source: source.into() }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::CredentialsMissing => "credentials_missing",
            GatewayError::AuthEndpoint { .. } => "auth_endpoint",
            GatewayError::Transport { .. } => "transport",
        }
    }
}
