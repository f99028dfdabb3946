use http::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::token_cache::TokenCache;
use crate::error::GatewayError;
use crate::observability::metrics::get_metrics;
use crate::resilience::retry::{AttemptOutcome, RefreshRetry};

/// Downstream status and parsed body, passed through untouched.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Status and raw bytes of a single attempt; the body is parsed only for the final one.
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// Sends PayPal requests with the cached bearer token and recovers once from a rejected token.
#[derive(Debug, Clone)]
pub struct AuthorizedRequestExecutor {
    client: Client,
    tokens: TokenCache,
    retry: RefreshRetry,
}

impl AuthorizedRequestExecutor {
    pub fn new(client: Client, tokens: TokenCache) -> Self {
        Self { client, tokens, retry: RefreshRetry::default() }
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// At most two downstream calls: the initial one and, only after a 403, one retry
    /// with a force-refreshed token.
    pub async fn execute(
        &self,
        operation: &str,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, GatewayError> {
        let metrics = get_metrics().await;
        let start = Instant::now();

        let attempt_method = method.clone();
        let attempted = self
            .retry
            .run_with_refresh(
                |raw: &RawResponse| raw.status,
                move |force_refresh| self.send_once(attempt_method.clone(), url, body, force_refresh),
            )
            .await;

        metrics
            .downstream_duration
            .with_label_values(&[operation])
            .observe(start.elapsed().as_secs_f64());

        let attempted = match attempted {
            Ok(attempted) => attempted,
            Err(e) => {
                metrics.downstream_requests.with_label_values(&[operation, e.kind()]).inc();
                return Err(e);
            }
        };

        if attempted.retried {
            metrics.downstream_retries.with_label_values(&[operation]).inc();
        }
        if attempted.outcome == AttemptOutcome::Rejected {
            info!("{} {} rejected twice, returning 403 to caller", method, url);
        }

        let RawResponse { status, body } = attempted.response;
        metrics
            .downstream_requests
            .with_label_values(&[operation, status.as_str()])
            .inc();

        let body = parse_body(&body).map_err(|e| GatewayError::transport(url, e))?;
        Ok(ApiResponse { status, body })
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        force_refresh: bool,
    ) -> Result<RawResponse, GatewayError> {
        let token = self.tokens.get_valid(force_refresh).await?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!("{} {} (forced refresh: {})", method, url, force_refresh);
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::transport(url, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(url, e))?;

        Ok(RawResponse { status, body: body.to_vec() })
    }
}

/// Empty bodies (204 on PATCH) become `null`; anything else must be JSON.
fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
}
