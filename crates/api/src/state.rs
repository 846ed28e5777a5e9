use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

/// Shared application state available to all handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: crunch_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Sliding-window limiter guarding battle requests.
    pub battle_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(pool: crunch_db::DbPool, config: ServerConfig) -> Self {
        let battle_limiter = Arc::new(RateLimiter::new(
            config.battle_rate_limit_per_min,
            std::time::Duration::from_secs(60),
        ));
        Self {
            pool,
            config: Arc::new(config),
            battle_limiter,
        }
    }
}
