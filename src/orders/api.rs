use anyhow::{anyhow, Result};
use reqwest::{Method, Url};
use serde_json::{json, Value};
use tracing::info;

use crate::cache::token_cache::TokenCache;
use crate::config::credentials::Credential;
use crate::config::types::ServiceConfig;
use crate::error::GatewayError;
use crate::orders::executor::{ApiResponse, AuthorizedRequestExecutor};
use crate::orders::payload::{create_order_payload, Cart, PatchOp};
use crate::sources::build_client;
use crate::sources::oauth2::OAuth2Source;

const ORDERS_PATH: [&str; 3] = ["v2", "checkout", "orders"];

/// PayPal Orders v2 operations. Each one is a single authorized call with no
/// retry logic of its own beyond the executor's refresh-on-403.
#[derive(Debug, Clone)]
pub struct PaypalOrders {
    base_url: Url,
    executor: AuthorizedRequestExecutor,
}

impl PaypalOrders {
    pub fn new(base_url: &str, executor: AuthorizedRequestExecutor) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("base url '{}' cannot carry a path", base_url));
        }
        Ok(Self { base_url, executor })
    }

    /// Wire client, token cache and executor from the service config.
    pub fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        let settings = &service_config.settings;
        let client = build_client(settings.http_timeout_seconds())?;
        let credential = Credential::from(&service_config.paypal);
        let source = OAuth2Source::new(&service_config.paypal.base_url, credential, client.clone());
        let tokens = TokenCache::new(source, settings.safety_margin_seconds());
        PaypalOrders::new(&service_config.paypal.base_url, AuthorizedRequestExecutor::new(client, tokens))
    }

    pub fn tokens(&self) -> &TokenCache {
        self.executor.tokens()
    }

    /// POST /v2/checkout/orders
    pub async fn create_order(&self, cart: &Cart) -> Result<ApiResponse, GatewayError> {
        let payload = create_order_payload(cart);
        let response = self
            .executor
            .execute("create_order", Method::POST, self.orders_url(&[]).as_str(), Some(&payload))
            .await?;
        if let Some(order_id) = response.body.get("id").and_then(Value::as_str) {
            info!("order {} created with status {}", order_id, response.status);
        }
        Ok(response)
    }

    /// PATCH /v2/checkout/orders/{order_id}
    pub async fn update_order(&self, order_id: &str, patch_ops: &[PatchOp]) -> Result<ApiResponse, GatewayError> {
        let payload = json!(patch_ops);
        self.executor
            .execute("update_order", Method::PATCH, self.orders_url(&[order_id]).as_str(), Some(&payload))
            .await
    }

    /// POST /v2/checkout/orders/{order_id}/capture
    pub async fn capture_order(&self, order_id: &str) -> Result<ApiResponse, GatewayError> {
        let payload = json!({});
        self.executor
            .execute("capture_order", Method::POST, self.orders_url(&[order_id, "capture"]).as_str(), Some(&payload))
            .await
    }

    /// GET /v2/checkout/orders/{order_id}
    pub async fn get_order_details(&self, order_id: &str) -> Result<ApiResponse, GatewayError> {
        self.executor
            .execute("get_order_details", Method::GET, self.orders_url(&[order_id]).as_str(), None)
            .await
    }

    /// Raw bearer token for collaborators calling PayPal on their own.
    pub async fn get_valid_access_token(&self, force_refresh: bool) -> Result<String, GatewayError> {
        self.executor.tokens().get_valid(force_refresh).await
    }

    /// Order ids are appended as encoded path segments, never spliced into the string.
    fn orders_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(ORDERS_PATH).extend(segments);
        }
        url
    }
}
