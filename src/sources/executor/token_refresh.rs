use std::time::Duration;

use tokio::sync::watch::Receiver;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cache::token_cache::TokenCache;
use crate::observability::metrics::get_metrics;

impl TokenCache {
    /// Revalidate the cached token every `interval_seconds` until `shutdown` flips to true
    /// (or its sender is dropped). Failures are logged and retried on the next tick.
    pub fn loop_refresh_token(
        &self,
        interval_seconds: u64,
        mut shutdown: Receiver<bool>,
    ) -> JoinHandle<()> {
        let cache = self.clone();
        let period = Duration::from_secs(interval_seconds.max(1));

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                "token refresh loop started, interval {} seconds, safety margin {} seconds",
                period.as_secs(),
                cache.safety_margin_seconds()
            );

            loop {
                if *shutdown.borrow() {
                    break;
                }
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        debug!("token refresh cycle start");
                        if let Err(err) = cache.get_valid(false).await {
                            get_metrics().await.background_refresh_failures.inc();
                            error!("error refreshing access token: {}", err);
                        }
                    }
                }
            }
            info!("token refresh loop stopped");
        })
    }
}
