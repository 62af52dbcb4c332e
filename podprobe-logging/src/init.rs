use anyhow::{Context, Result};
use podprobe_config::domains::logging::LogFormat;
use podprobe_config::LoggingConfig;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the env filter for a level string, falling back to `RUST_LOG` and then `info`
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(config)];

    if let Some(path) = &config.file_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path))?;

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_thread_ids(config.include_thread_ids)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed();
        layers.push(file_layer);
    }

    let filter = build_env_filter(&config.level.to_string());

    // Use try_init to avoid panic if global subscriber already set
    if tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    let base = tracing_subscriber::fmt::layer()
        .with_thread_ids(config.include_thread_ids)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    match config.format {
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_events(FmtSpan::NONE)
            .boxed(),
        LogFormat::Compact => base.compact().with_target(false).boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Text => base.with_target(true).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podprobe_config::domains::logging::LogLevel;

    #[test]
    fn test_env_filter_accepts_config_level() {
        let filter = build_env_filter(&LogLevel::Debug.to_string());
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_env_filter_falls_back_on_garbage() {
        // An unparsable directive must never abort startup
        let filter = build_env_filter("=[not a directive");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_init_with_file_sink_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.log");
        let config = LoggingConfig {
            file_path: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };

        init_logging_from_config(&config).unwrap();
        init_logging_from_config(&config).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let config = LoggingConfig {
            file_path: Some("/nonexistent-dir/podprobe/probe.log".to_string()),
            ..Default::default()
        };
        assert!(init_logging_from_config(&config).is_err());
    }
}
