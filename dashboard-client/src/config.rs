//! Configuration management for the dashboard client

use std::time::Duration;

use crate::error::{DashboardError, Result};

/// Dashboard client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level / filter directive
    pub log_level: String,

    /// Dashboard API base URL (no trailing slash)
    pub api_base_url: String,

    /// Identity service
    pub identity_base_url: String,
    pub identity_api_key: String,

    /// Poller periods in milliseconds
    pub market_refresh_ms: u64,
    pub portfolio_refresh_ms: u64,

    /// Counter animation length in milliseconds
    pub counter_animation_ms: u64,

    /// How long a trade message stays visible
    pub trade_message_ttl_ms: u64,

    /// Where the binary writes the rendered page
    pub output_path: String,

    /// Optional credentials for unattended sign-in
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal outside local development
        let _ = dotenvy::dotenv();
        let config = Self::from_lookup(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| default.to_string())
        };
        let millis = |key: &str, default: u64| {
            lookup(key)
                .map(|v| v.trim().parse().unwrap_or(default))
                .unwrap_or(default)
        };

        Self {
            environment: string("ENVIRONMENT", "development"),

            log_level: string("LOG_LEVEL", "info"),

            api_base_url: string("API_BASE_URL", "http://localhost:8000")
                .trim_end_matches('/')
                .to_string(),

            identity_base_url: string(
                "IDENTITY_BASE_URL",
                "https://identitytoolkit.googleapis.com/v1",
            )
            .trim_end_matches('/')
            .to_string(),

            identity_api_key: string("IDENTITY_API_KEY", ""),

            market_refresh_ms: millis("MARKET_REFRESH_MS", 30_000),

            portfolio_refresh_ms: millis("PORTFOLIO_REFRESH_MS", 60_000),

            counter_animation_ms: millis("COUNTER_ANIMATION_MS", 2_000),

            trade_message_ttl_ms: millis("TRADE_MESSAGE_TTL_MS", 4_000),

            output_path: string("DASHBOARD_OUTPUT", "dashboard.html"),

            email: lookup("DASHBOARD_EMAIL").filter(|v| !v.trim().is_empty()),
            password: lookup("DASHBOARD_PASSWORD").filter(|v| !v.is_empty()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(DashboardError::Config("API_BASE_URL must not be empty".into()));
        }
        if self.identity_base_url.is_empty() {
            return Err(DashboardError::Config(
                "IDENTITY_BASE_URL must not be empty".into(),
            ));
        }
        if self.market_refresh_ms == 0 || self.portfolio_refresh_ms == 0 {
            return Err(DashboardError::Config(
                "refresh intervals must be positive".into(),
            ));
        }
        if self.counter_animation_ms == 0 {
            return Err(DashboardError::Config(
                "COUNTER_ANIMATION_MS must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn market_refresh(&self) -> Duration {
        Duration::from_millis(self.market_refresh_ms)
    }

    pub fn portfolio_refresh(&self) -> Duration {
        Duration::from_millis(self.portfolio_refresh_ms)
    }

    pub fn counter_animation(&self) -> Duration {
        Duration::from_millis(self.counter_animation_ms)
    }

    pub fn trade_message_ttl(&self) -> Duration {
        Duration::from_millis(self.trade_message_ttl_ms)
    }
}
