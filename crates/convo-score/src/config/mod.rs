use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::scoring::{ScoringConfig, ScoringConfigError};

/// Upper bound for `APP_ANALYSIS_RETENTION_DAYS`, roughly a century.
pub const MAX_RETENTION_DAYS: u32 = 36_500;

/// Distinguishes runtime behavior for different stages of a deployment.
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

/// Top-level configuration for the analyzer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub batch: BatchConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = env::var("APP_LOG_ANSI")
            .ok()
            .and_then(|value| parse_flag(&value))
            .unwrap_or(environment == AppEnvironment::Development);

        let workers = env::var("APP_BATCH_WORKERS")
            .unwrap_or_else(|_| "4".to_string())
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|workers| *workers > 0)
            .ok_or(ConfigError::InvalidWorkers)?;

        let retention_days = env::var("APP_ANALYSIS_RETENTION_DAYS")
            .unwrap_or_else(|_| "90".to_string())
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|days| *days <= MAX_RETENTION_DAYS)
            .ok_or(ConfigError::InvalidRetention)?;

        let scoring = match env::var("APP_SCORING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => load_scoring_file(PathBuf::from(path.trim()))?,
            _ => ScoringConfig::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level, ansi },
            batch: BatchConfig {
                workers,
                retention_days,
            },
            scoring,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn load_scoring_file(path: PathBuf) -> Result<ScoringConfig, ConfigError> {
    let raw = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::ScoringFile { path, source })?;
    let scoring: ScoringConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringParse { source })?;
    scoring.validate().map_err(ConfigError::InvalidScoring)?;
    Ok(scoring)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored output; defaults on only in development.
    pub ansi: bool,
}

/// Scheduled analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Conversations analyzed concurrently.
    pub workers: usize,
    pub retention_days: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWorkers,
    InvalidRetention,
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringParse {
        source: serde_json::Error,
    },
    InvalidScoring(ScoringConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWorkers => {
                write!(f, "APP_BATCH_WORKERS must be a positive integer")
            }
            ConfigError::InvalidRetention => {
                write!(
                    f,
                    "APP_ANALYSIS_RETENTION_DAYS must be a whole number of days up to {}",
                    MAX_RETENTION_DAYS
                )
            }
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "could not read scoring config {}", path.display())
            }
            ConfigError::ScoringParse { .. } => {
                write!(f, "APP_SCORING_CONFIG does not contain valid scoring JSON")
            }
            ConfigError::InvalidScoring(err) => write!(f, "invalid scoring config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidWorkers | ConfigError::InvalidRetention => None,
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringParse { source } => Some(source),
            ConfigError::InvalidScoring(err) => Some(err),
        }
    }
}
