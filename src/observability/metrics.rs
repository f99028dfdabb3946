use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;


// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_acquisitions: IntCounterVec,
    pub token_cache_hits: IntCounter,
    pub token_expiry_unix: IntGauge,
    pub background_refresh_failures: IntCounter,

    // PayPal API metrics
    pub downstream_requests: IntCounterVec,
    pub downstream_retries: IntCounterVec,
    pub downstream_duration: HistogramVec,

    // runtime
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        // names and label sets are static, construction cannot fail
        let registry = Registry::new_custom(Some("paypalgateway".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Token
            token_acquisitions: IntCounterVec::new(Opts::new("token_acquisitions_total", "Access token requests by outcome"),&["outcome"],).unwrap(),
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Access token served from cache").unwrap(),
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Expiry of the cached access token").unwrap(),
            background_refresh_failures: IntCounter::new("background_refresh_failures_total", "Failed background token revalidations").unwrap(),

            // PayPal API
            downstream_requests: IntCounterVec::new(Opts::new("downstream_requests_total", "PayPal API calls by operation and final status or error kind"),&["operation", "status"],).unwrap(),
            downstream_retries: IntCounterVec::new(Opts::new("downstream_retries_total", "Calls retried after a 403 with a refreshed token"),&["operation"],).unwrap(),
            downstream_duration: HistogramVec::new(HistogramOpts::new("downstream_duration_seconds", "PayPal API call duration including the retry").buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),&["operation"],).unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_acquisitions.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.background_refresh_failures.clone())).unwrap();
        reg.register(Box::new(metrics.downstream_requests.clone())).unwrap();
        reg.register(Box::new(metrics.downstream_retries.clone())).unwrap();
        reg.register(Box::new(metrics.downstream_duration.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
