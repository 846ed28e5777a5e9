use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Shared secret the payment gateway signs webhooks with.
    pub payment_webhook_secret: String,
    /// Maximum clock skew accepted on webhook signatures (default: `300`).
    pub payment_webhook_tolerance_secs: i64,
    /// Battles a single user may start per minute (default: `15`).
    pub battle_rate_limit_per_min: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `PAYMENT_WEBHOOK_SECRET`         | required                |
    /// | `PAYMENT_WEBHOOK_TOLERANCE_SECS` | `300`                   |
    /// | `BATTLE_RATE_LIMIT_PER_MIN`      | `15`                    |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values or a missing secret.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let payment_webhook_secret = std::env::var("PAYMENT_WEBHOOK_SECRET")
            .expect("PAYMENT_WEBHOOK_SECRET must be set in the environment");
        assert!(
            !payment_webhook_secret.is_empty(),
            "PAYMENT_WEBHOOK_SECRET must not be empty"
        );

        let payment_webhook_tolerance_secs: i64 = std::env::var("PAYMENT_WEBHOOK_TOLERANCE_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("PAYMENT_WEBHOOK_TOLERANCE_SECS must be a valid i64");

        let battle_rate_limit_per_min: usize = std::env::var("BATTLE_RATE_LIMIT_PER_MIN")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("BATTLE_RATE_LIMIT_PER_MIN must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            payment_webhook_secret,
            payment_webhook_tolerance_secs,
            battle_rate_limit_per_min,
        }
    }
}
