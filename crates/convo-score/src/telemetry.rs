//! Log output for the analyzer. Everything goes to stderr so report output on stdout
//! stays machine-readable.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidDirective { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidDirective { directive, .. } => {
                write!(f, "log directive '{}' cannot be parsed", directive)
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a global log subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidDirective { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Pick the active directive: a non-blank `RUST_LOG` wins over the configured level.
fn resolve_directive(rust_log: Option<String>, config: &TelemetryConfig) -> String {
    rust_log
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.log_level.trim().to_string())
}

fn build_filter(directive: String) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&directive)
        .map_err(|source| TelemetryError::InvalidDirective { directive, source })
}

/// Install the global subscriber once per process.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let directive = resolve_directive(std::env::var("RUST_LOG").ok(), config);
    let filter = build_filter(directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(config.ansi)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
            ansi: false,
        }
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let directive = resolve_directive(Some("convo_score=trace".to_string()), &config("info"));
        assert_eq!(directive, "convo_score=trace");
    }

    #[test]
    fn blank_rust_log_falls_back_to_configured_level() {
        assert_eq!(resolve_directive(Some("  ".to_string()), &config(" warn ")), "warn");
        assert_eq!(resolve_directive(None, &config("debug")), "debug");
    }

    #[test]
    fn unparsable_directive_is_reported() {
        let err = build_filter("convo_score=[".to_string()).expect_err("invalid directive");
        assert!(matches!(
            err,
            TelemetryError::InvalidDirective { ref directive, .. } if directive == "convo_score=["
        ));
    }
}
