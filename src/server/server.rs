use anyhow::Result;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde_json::json;
use tokio::sync::watch::Receiver;
use tracing::{error, info};

use crate::config::settings::SettingsConfig;
use crate::error::GatewayError;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::orders::api::PaypalOrders;
use crate::orders::executor::ApiResponse;
use crate::orders::payload::{update_order_patch, Cart, OrderUpdate};

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub orders: PaypalOrders,
}

impl AppState {
    pub fn new(metrics: &Metrics, orders: PaypalOrders) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            orders,
        }
    }
}

/// Order routes plus `/metrics` when enabled.
pub fn router(settings_config: &SettingsConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/checkout.html") }))
        .route("/api/orders", post(create_order))
        .route(
            "/api/orders/{order_id}",
            get(get_order_details).put(update_order).patch(update_order),
        )
        .route("/api/orders/{order_id}/capture", post(capture_order))
        .merge(state.metrics_state.router(&settings_config.metrics))
        .with_state(state)
}

/// Serve until `shutdown` flips to true.
pub async fn start(
    settings_config: &SettingsConfig,
    orders: PaypalOrders,
    mut shutdown: Receiver<bool>,
) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, orders);
    let app = router(settings_config, state);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("server running on http://{}", bind_addr);
    metrics.up.set(1);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            info!("server shutting down");
        })
        .await?;

    metrics.up.set(0);
    Ok(())
}

async fn create_order(State(state): State<AppState>, Json(cart): Json<Cart>) -> Response {
    respond("create order", state.orders.create_order(&cart).await)
}

async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(update): Json<OrderUpdate>,
) -> Response {
    let patch_ops = update_order_patch(&update);
    respond("update order", state.orders.update_order(&order_id, &patch_ops).await)
}

async fn capture_order(State(state): State<AppState>, Path(order_id): Path<String>) -> Response {
    respond("capture order", state.orders.capture_order(&order_id).await)
}

async fn get_order_details(State(state): State<AppState>, Path(order_id): Path<String>) -> Response {
    respond("get order details", state.orders.get_order_details(&order_id).await)
}

/// PayPal's status and body go out unchanged; only local failures become 500.
fn respond(action: &str, result: Result<ApiResponse, GatewayError>) -> Response {
    match result {
        Ok(ApiResponse { status, body }) => (status, Json(body)).into_response(),
        Err(e) => {
            error!("failed to {}: {}", action, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Failed to {}.", action) })),
            )
                .into_response()
        }
    }
}
