//! Configuration management for the NutriTrack engine runner
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NT__)

use anyhow::Result;
use nutritrack_shared::nutrition::DailyTargets;
use nutritrack_shared::progression::MAX_STREAK_LOOKBACK_DAYS;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Targets used for users who have not finished onboarding
    pub default_targets: DailyTargets,
    /// Upper bound on days walked back when counting a streak
    pub streak_lookback_days: usize,
    /// Protein accuracy (%) at which a day counts as hitting the target
    pub protein_hit_threshold: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_targets: DailyTargets::default(),
            streak_lookback_days: MAX_STREAK_LOOKBACK_DAYS,
            protein_hit_threshold: 90.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(
                config::File::with_name(&config_file)
                    .required(false)
            )
            // Override with environment variables (NT__ prefix)
            // e.g., NT__ENGINE__STREAK_LOOKBACK_DAYS=90 sets engine.streak_lookback_days
            .add_source(
                config::Environment::with_prefix("NT")
                    .separator("__")
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
