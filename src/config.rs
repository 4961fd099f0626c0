//! Configuration management for the dashboard worker

use crate::error::{DashboardError, Result};
use worker::Env;

/// Dashboard worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Base URL of the static artifact host (required)
    pub artifact_base_url: String,

    /// Trailing window for the liquidation chart, in days
    pub liquidation_window_days: usize,

    /// Trailing window for the signal chart, in days
    pub signal_window_days: usize,
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let artifact_base_url = env
            .var("ARTIFACT_BASE_URL")
            .map(|v| v.to_string())
            .map_err(|_| DashboardError::Config("ARTIFACT_BASE_URL must be set".into()))?;

        let config = Self {
            environment: env
                .var("ENVIRONMENT")
                .map_or_else(|_| "production".to_string(), |v| v.to_string()),

            artifact_base_url,

            liquidation_window_days: env
                .var("LIQUIDATION_WINDOW_DAYS")
                .map(|v| v.to_string().parse().unwrap_or(90))
                .unwrap_or(90),

            signal_window_days: env
                .var("SIGNAL_WINDOW_DAYS")
                .map(|v| v.to_string().parse().unwrap_or(60))
                .unwrap_or(60),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.artifact_base_url.trim().is_empty() {
            return Err(DashboardError::Config(
                "artifact_base_url must not be empty".into(),
            ));
        }
        if self.liquidation_window_days == 0 {
            return Err(DashboardError::Config(
                "liquidation_window_days must be positive".into(),
            ));
        }
        if self.signal_window_days == 0 {
            return Err(DashboardError::Config(
                "signal_window_days must be positive".into(),
            ));
        }
        Ok(())
    }
}
