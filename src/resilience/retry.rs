use std::future::Future;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::GatewayError;

/// Terminal state of an authorized request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// any status other than the rejected one, business errors included
    Success,
    /// still rejected after the forced refresh
    Rejected,
}

/// Final response plus how the call ended.
#[derive(Debug)]
pub struct Attempted<T> {
    pub response: T,
    pub outcome: AttemptOutcome,
    pub retried: bool,
}

/// Re-issue a request once, with a freshly acquired token, when the first
/// response carries `rejected_status`. No backoff and no further attempts:
/// a second rejection is handed back unchanged.
#[derive(Debug, Clone, Copy)]
pub struct RefreshRetry {
    pub rejected_status: StatusCode,
}

impl Default for RefreshRetry {
    fn default() -> Self {
        // PayPal answers 403 for an expired or revoked bearer token, never 401
        Self { rejected_status: StatusCode::FORBIDDEN }
    }
}

impl RefreshRetry {
    /// `operation(force_refresh)` performs one request; `status_of` reads its status.
    ///
    /// RequestSent -> Success
    /// RequestSent -> Unauthorized -> RefreshForced -> RequestRetried -> Success | Rejected
    pub async fn run_with_refresh<F, Fut, T, S>(
        &self,
        status_of: S,
        mut operation: F,
    ) -> Result<Attempted<T>, GatewayError>
    where
        F: FnMut(bool) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
        S: Fn(&T) -> StatusCode,
    {
        let first = operation(false).await?;
        let status = status_of(&first);
        if status != self.rejected_status {
            debug!("request finished with status {}", status);
            return Ok(Attempted { response: first, outcome: AttemptOutcome::Success, retried: false });
        }

        warn!("request rejected with {}, forcing token refresh", status);
        let second = operation(true).await?;
        let status = status_of(&second);
        if status == self.rejected_status {
            warn!("request still rejected with {} after token refresh", status);
            return Ok(Attempted { response: second, outcome: AttemptOutcome::Rejected, retried: true });
        }

        debug!("retried request finished with status {}", status);
        Ok(Attempted { response: second, outcome: AttemptOutcome::Success, retried: true })
    }
}
