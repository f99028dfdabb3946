// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json};
use reqwest::Client;

use crate::cache::token_cache::TokenCache;
use crate::config::credentials::Credential;
use crate::orders::api::PaypalOrders;
use crate::orders::executor::AuthorizedRequestExecutor;
use crate::sources::oauth2::{OAuth2Source, TOKEN_PATH};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
/// base64("client-id:client-secret")
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn credential() -> Credential {
    Credential::new(Some(CLIENT_ID.into()), Some(CLIENT_SECRET.into()))
}

pub fn token_cache(base_url: &str, credential: Credential) -> TokenCache {
    let source = OAuth2Source::new(base_url, credential, build_reqwest_client());
    TokenCache::new(source, 120)
}

pub fn executor(base_url: &str) -> AuthorizedRequestExecutor {
    AuthorizedRequestExecutor::new(build_reqwest_client(), token_cache(base_url, credential()))
}

pub fn paypal_orders(base_url: &str, credential: Credential) -> PaypalOrders {
    let executor = AuthorizedRequestExecutor::new(build_reqwest_client(), token_cache(base_url, credential));
    PaypalOrders::new(base_url, executor).expect("orders api")
}

/// Token endpoint handing out T1, T2, T3... (one hour each) and counting requests.
pub fn sequential_token_router(counter: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        TOKEN_PATH,
        post(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                (
                    StatusCode::OK,
                    Json(json!({
                        "access_token": format!("T{}", n),
                        "token_type": "Bearer",
                        "expires_in": 3600
                    })),
                )
            }
        }),
    )
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
