use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::{CITIES_FILE, COMPENSATION_FILE};
use crate::simulator::StrategyKind;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub simulator: SimulatorConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let strategy = match env::var("NEARSHORE_STRATEGY") {
            Ok(value) => StrategyKind::parse(&value)
                .ok_or(ConfigError::InvalidStrategy { value })?,
            Err(_) => StrategyKind::default(),
        };

        let data_dir = env::var("NEARSHORE_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            simulator: SimulatorConfig {
                strategy,
                data_dir: PathBuf::from(data_dir),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Dataset location and scoring strategy.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub strategy: StrategyKind,
    pub data_dir: PathBuf,
}

impl SimulatorConfig {
    pub fn cities_path(&self) -> PathBuf {
        self.data_dir.join(CITIES_FILE)
    }

    pub fn compensation_path(&self) -> PathBuf {
        self.data_dir.join(COMPENSATION_FILE)
    }

    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidStrategy { value: String },
    EmptyDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStrategy { value } => write!(
                f,
                "NEARSHORE_STRATEGY must be 'normalized' or 'tabular', found '{value}'"
            ),
            ConfigError::EmptyDataDir => write!(f, "NEARSHORE_DATA_DIR must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("NEARSHORE_STRATEGY");
        env::remove_var("NEARSHORE_DATA_DIR");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.simulator.strategy, StrategyKind::Normalized);
        assert_eq!(config.simulator.cities_path(), PathBuf::from("data/cities.json"));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn selects_tabular_strategy_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NEARSHORE_STRATEGY", "tabular");
        env::set_var("APP_ENV", "ci");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.simulator.strategy, StrategyKind::Tabular);
        assert_eq!(config.environment, AppEnvironment::Test);
        reset_env();
    }

    #[test]
    fn rejects_unknown_strategy() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NEARSHORE_STRATEGY", "vibes");
        match AppConfig::load() {
            Err(ConfigError::InvalidStrategy { value }) => assert_eq!(value, "vibes"),
            other => panic!("expected invalid strategy error, got {other:?}"),
        }
        reset_env();
    }
}
