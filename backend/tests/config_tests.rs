//! Server configuration resolution: file, then environment.

mod support;

use std::path::PathBuf;

use tempfile::NamedTempFile;

use perf_predictor::config::{ConfigError, ServerConfig};
use support::with_scoped_env;

const ENV_KEYS: [&str; 4] = ["HOST", "PORT", "MODEL_PATH", "ALLOW_MISSING_MODEL"];

fn write_config(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), content).unwrap();
    file
}

/// Clear every override, then apply `set`.
fn env_changes<'a>(
    config: &'a str,
    set: &[(&'a str, &'a str)],
) -> Vec<(&'a str, Option<&'a str>)> {
    let mut changes: Vec<(&str, Option<&str>)> = ENV_KEYS.iter().map(|k| (*k, None)).collect();
    changes.push(("PREDICTOR_CONFIG", Some(config)));
    for (k, v) in set {
        changes.retain(|(key, _)| key != k);
        changes.push((*k, Some(*v)));
    }
    changes
}

#[test]
fn test_file_values_used_without_env() {
    let file = write_config(
        r#"
[server]
host = "127.0.0.1"
port = 9000

[model]
path = "/srv/models/perf.json"
allow_missing = true
"#,
    );
    let path = file.path().to_str().unwrap();

    let config = with_scoped_env(&env_changes(path, &[]), ServerConfig::load).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.model.path, PathBuf::from("/srv/models/perf.json"));
    assert!(config.model.allow_missing);
    assert_eq!(config.bind_address().unwrap().port(), 9000);
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let file = write_config("[server]\nport = 7000\n");
    let path = file.path().to_str().unwrap();

    let config = with_scoped_env(&env_changes(path, &[]), ServerConfig::load).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.model.path, PathBuf::from("model.json"));
    assert!(!config.model.allow_missing);
}

#[test]
fn test_env_overrides_file() {
    let file = write_config("[server]\nport = 7000\n\n[model]\npath = \"a.json\"\n");
    let path = file.path().to_str().unwrap();

    let config = with_scoped_env(
        &env_changes(
            path,
            &[
                ("PORT", "8181"),
                ("MODEL_PATH", "b.json"),
                ("ALLOW_MISSING_MODEL", "yes"),
            ],
        ),
        ServerConfig::load,
    )
    .unwrap();
    assert_eq!(config.server.port, 8181);
    assert_eq!(config.model.path, PathBuf::from("b.json"));
    assert!(config.model.allow_missing);
}

#[test]
fn test_invalid_port_rejected() {
    let file = write_config("");
    let path = file.path().to_str().unwrap();

    let err = with_scoped_env(&env_changes(path, &[("PORT", "eighty")]), ServerConfig::load)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { var: "PORT", .. }));
}

#[test]
fn test_invalid_flag_rejected() {
    let file = write_config("");
    let path = file.path().to_str().unwrap();

    let err = with_scoped_env(
        &env_changes(path, &[("ALLOW_MISSING_MODEL", "sometimes")]),
        ServerConfig::load,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidEnv {
            var: "ALLOW_MISSING_MODEL",
            ..
        }
    ));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let err = with_scoped_env(
        &env_changes("/nonexistent/predictor.toml", &[]),
        ServerConfig::load,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_config("[server\nport = ");
    let path = file.path().to_str().unwrap();

    let err = with_scoped_env(&env_changes(path, &[]), ServerConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_invalid_host_rejected_at_bind() {
    let file = write_config("");
    let path = file.path().to_str().unwrap();

    let config = with_scoped_env(
        &env_changes(path, &[("HOST", "not a host")]),
        ServerConfig::load,
    )
    .unwrap();
    assert!(matches!(
        config.bind_address(),
        Err(ConfigError::InvalidAddress(_))
    ));
}
