//! Loading server configuration from files and the environment.

mod support;

use std::io::Write;

use referee_backend::config::{ConfigError, ServerConfig, CONFIG_PATH_ENV};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_from_file_reads_settings() {
    let file = write_config("[server]\nhost = \"127.0.0.1\"\nport = 9001\n");
    let config = ServerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9001);
}

#[test]
fn test_from_file_missing_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_from_file_malformed_is_parse_error() {
    let file = write_config("[server\nport = 1");
    let err = ServerConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_load_uses_config_env_and_overrides() {
    let file = write_config("[server]\nport = 9001\n\n[seed]\npath = \"league.json\"\n");
    let path = file.path().to_str().unwrap().to_string();

    let config = support::with_scoped_env(
        &[
            (CONFIG_PATH_ENV, Some(path.as_str())),
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("9500")),
            ("SEED_PATH", None),
        ],
        ServerConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9500);
    assert_eq!(
        config.seed.path.as_deref(),
        Some(std::path::Path::new("league.json"))
    );
    assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9500");
}

#[test]
fn test_seed_path_env_override() {
    let mut config = ServerConfig::default();
    support::with_scoped_env(
        &[("HOST", None), ("PORT", None), ("SEED_PATH", Some("/tmp/seed.json"))],
        || config.apply_env_overrides(),
    )
    .unwrap();
    assert_eq!(
        config.seed.path.as_deref(),
        Some(std::path::Path::new("/tmp/seed.json"))
    );
}

#[test]
fn test_invalid_port_env_is_rejected() {
    let mut config = ServerConfig::default();
    let err = support::with_scoped_env(&[("PORT", Some("eighty"))], || {
        config.apply_env_overrides()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
}

#[test]
fn test_missing_config_env_file_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let result = support::with_scoped_env(
        &[(CONFIG_PATH_ENV, Some(missing.to_str().unwrap()))],
        ServerConfig::load,
    );
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
