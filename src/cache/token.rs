use crate::helpers::time::now_i64;

/// Bearer token and the instant it stops being accepted by PayPal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: i64, // UNIX TIMESTAMP
}

impl CachedToken {
    /// `issued_at` is taken before the token request was sent, so the computed
    /// expiry never lies past the server-side one.
    pub fn new(value: String, issued_at: i64, lifetime_seconds: u64) -> Self {
        let lifetime = i64::try_from(lifetime_seconds).unwrap_or(i64::MAX);
        Self { value, expires_at: issued_at.saturating_add(lifetime) }
    }

    pub fn remaining_seconds(&self) -> i64 {
        self.expires_at - now_i64()
    }

    /// Usable only while strictly more than `safety_margin_seconds` remain.
    pub fn is_usable(&self, safety_margin_seconds: u64) -> bool {
        self.remaining_seconds() > i64::try_from(safety_margin_seconds).unwrap_or(i64::MAX)
    }
}
