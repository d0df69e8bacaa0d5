use std::sync::Once;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable, colored output
    Pretty,
}

/// Build the filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(level: &str, format: LogFormat) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt().with_env_filter(env_filter(level));
        let result = match format {
            LogFormat::Json => builder.json().with_current_span(true).try_init(),
            LogFormat::Pretty => builder.with_target(false).try_init(),
        };
        if let Err(e) = result {
            eprintln!("failed to initialize logging: {e}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_falls_back_to_level() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter("debug").to_string(), "debug");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging("info", LogFormat::Pretty);
        init_logging("debug", LogFormat::Json);
        assert!(tracing::dispatcher::has_been_set());
    }
}
