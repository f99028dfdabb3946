use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::token::CachedToken;
use crate::error::GatewayError;
use crate::helpers::time::{now_i64, to_rfc3339};
use crate::observability::metrics::get_metrics;
use crate::sources::oauth2::OAuth2Source;

#[derive(Debug, Default)]
struct TokenState {
    token: Option<CachedToken>,
    /// bumped on every acquisition attempt, failed ones included
    attempts: u64,
    /// error of the latest attempt, None when it succeeded
    last_failure: Option<GatewayError>,
}

#[derive(Debug)]
struct Inner {
    source: OAuth2Source,
    safety_margin_seconds: u64,
    state: RwLock<TokenState>,
    /// serializes acquisitions so concurrent misses share one request
    acquire_gate: Mutex<()>,
}

/// Single PayPal access token, shared by every caller through cheap clones.
#[derive(Debug, Clone)]
pub struct TokenCache {
    inner: Arc<Inner>,
}

impl TokenCache {
    pub fn new(source: OAuth2Source, safety_margin_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                safety_margin_seconds,
                state: RwLock::new(TokenState::default()),
                acquire_gate: Mutex::new(()),
            }),
        }
    }

    pub fn safety_margin_seconds(&self) -> u64 {
        self.inner.safety_margin_seconds
    }

    /// Returns a token that stays valid for more than the safety margin.
    ///
    /// The cached value is served without any network call unless it is absent,
    /// too close to expiry, or `force_refresh` is set. Callers that miss while
    /// another acquisition is in flight wait for it and share its outcome,
    /// the error included when it failed.
    pub async fn get_valid(&self, force_refresh: bool) -> Result<String, GatewayError> {
        let seen_attempts = {
            let state = self.inner.state.read().await;
            if !force_refresh {
                if let Some(token) = self.usable(&state) {
                    get_metrics().await.token_cache_hits.inc();
                    return Ok(token.value.clone());
                }
            }
            state.attempts
        };

        let _gate = self.inner.acquire_gate.lock().await;

        {
            let state = self.inner.state.read().await;
            if state.attempts != seen_attempts {
                match (&state.last_failure, &state.token) {
                    (Some(e), _) => {
                        debug!("sharing failure of a concurrent acquisition");
                        return Err(e.clone());
                    }
                    (None, Some(token)) => {
                        debug!("reusing access token acquired by a concurrent caller");
                        return Ok(token.value.clone());
                    }
                    (None, None) => {}
                }
            }
        }

        self.acquire_locked().await
    }

    /// Unconditionally requests a new token and stores it.
    /// On failure the previously cached token stays in place.
    pub async fn acquire(&self) -> Result<String, GatewayError> {
        let _gate = self.inner.acquire_gate.lock().await;
        self.acquire_locked().await
    }

    /// Copy of the cached token, for observability and tests.
    pub async fn snapshot(&self) -> Option<CachedToken> {
        self.inner.state.read().await.token.clone()
    }

    fn usable<'a>(&self, state: &'a TokenState) -> Option<&'a CachedToken> {
        state
            .token
            .as_ref()
            .filter(|token| token.is_usable(self.inner.safety_margin_seconds))
    }

    // caller must hold `acquire_gate`
    async fn acquire_locked(&self) -> Result<String, GatewayError> {
        let metrics = get_metrics().await;
        let issued_at = now_i64();

        let granted = match self.inner.source.fetch_token().await {
            Ok(granted) => granted,
            Err(e) => {
                metrics.token_acquisitions.with_label_values(&[e.kind()]).inc();
                warn!("access token acquisition failed, keeping previous token: {}", e);
                let mut state = self.inner.state.write().await;
                state.attempts += 1;
                state.last_failure = Some(e.clone());
                return Err(e);
            }
        };

        let token = CachedToken::new(granted.access_token, issued_at, granted.expires_in);
        let value = token.value.clone();
        metrics.token_acquisitions.with_label_values(&["success"]).inc();
        metrics.token_expiry_unix.set(token.expires_at);
        info!(
            "access token acquired, expires in {} seconds at {}",
            granted.expires_in,
            to_rfc3339(token.expires_at)
        );

        let mut state = self.inner.state.write().await;
        state.token = Some(token);
        state.attempts += 1;
        state.last_failure = None;

        Ok(value)
    }
}
