//! Integration tests for podprobe-config

use podprobe_config::domains::logging::{LogFormat, LogLevel};
use podprobe_config::*;
use std::io::Write;
use temp_env::with_vars;

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("PODPROBE_SERVER_PORT", Some("9000")),
        ("PODPROBE_LOG_LEVEL", Some("debug")),
        ("PODPROBE_LOG_FORMAT", Some("json")),
        ("PODPROBE_WORKING_DIR", Some("/data/probe")),
        ("PODPROBE_METADATA_DIR", Some("/opt/cloud")),
    ];

    with_vars(vars, || {
        let config = ConfigLoader::new().from_env().unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.filesystem.working_dir, "/data/probe");
        assert_eq!(config.cloud.metadata_dir, "/opt/cloud");
    });
}

#[test]
fn test_invalid_env_override_is_rejected() {
    with_vars(vec![("PODPROBE_SERVER_PORT", Some("not-a-port"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    });

    with_vars(vec![("PODPROBE_LOG_LEVEL", Some("loud"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(err.to_string().contains("LOG_LEVEL"));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("PROBE_TEST_SERVER_PORT", Some("7070"))], || {
        let config = ConfigLoader::with_prefix("PROBE_TEST").from_env().unwrap();
        assert_eq!(config.server.port, 7070);
    });
}

#[test]
fn test_load_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
server:
  port: 8181
  api_prefix: /probe
logging:
  level: warn
  format: compact
simulation:
  thread_count: 5
  exit_delay_ms: 250
cloud:
  fallback_region: eu-central-1
"#
    )
    .unwrap();

    with_vars(vec![("PODPROBE_SERVER_PORT", None::<&str>)], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 8181);
        assert_eq!(config.server.api_prefix, "/probe");
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.simulation.thread_count, 5);
        assert_eq!(config.simulation.exit_delay_ms, 250);
        assert_eq!(config.simulation.cpu_duration_seconds, 30);
        assert_eq!(config.cloud.fallback_region, "eu-central-1");
    });
}

#[test]
fn test_env_overrides_win_over_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  port: 8181\n").unwrap();

    with_vars(vec![("PODPROBE_SERVER_PORT", Some("8282"))], || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 8282);
    });
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server:\n  api_prefix: api\n").unwrap();

    with_vars(vec![("PODPROBE_SERVER_PORT", None::<&str>)], || {
        let err = ConfigLoader::new().from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { .. }));
    });
}

#[test]
fn test_missing_file_is_read_error() {
    let err = ConfigLoader::new()
        .from_file("/nonexistent/podprobe.yaml")
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}
