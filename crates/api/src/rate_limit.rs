//! In-process sliding-window rate limiter.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crunch_core::error::CoreError;
use crunch_core::types::DbId;
use tokio::sync::Mutex;

/// Allows at most `limit` hits per key within any `window`.
///
/// Designed to be wrapped in `Arc` and shared across handlers.
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Key used for a user's battle requests.
    pub fn battle_key(user_id: DbId) -> String {
        format!("battle:{user_id}")
    }

    /// Record a hit for `key` now, or fail with `RateLimited`.
    pub async fn check(&self, key: &str) -> Result<(), CoreError> {
        self.check_at(key, Instant::now()).await
    }

    /// Record a hit for `key` at `now`. Rejected hits are not recorded.
    ///
    /// Keys whose hits have all aged out are dropped on every check.
    pub async fn check_at(&self, key: &str, now: Instant) -> Result<(), CoreError> {
        let mut hits = self.hits.lock().await;
        hits.retain(|_, window| {
            while window
                .front()
                .is_some_and(|&oldest| now.saturating_duration_since(oldest) >= self.window)
            {
                window.pop_front();
            }
            !window.is_empty()
        });

        let window = hits.get(key);
        if window.map_or(0, VecDeque::len) >= self.limit {
            let oldest = window.and_then(|w| w.front().copied()).unwrap_or(now);
            let remaining = self
                .window
                .saturating_sub(now.saturating_duration_since(oldest));
            let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            tracing::debug!(key, retry_after_secs, "Rate limit exceeded");
            return Err(CoreError::RateLimited {
                retry_after_secs: retry_after_secs.max(1),
            });
        }

        hits.entry(key.to_string()).or_default().push_back(now);
        Ok(())
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.hits.lock().await.len()
    }
}
