use dnslookup_domain::config::{CliOverrides, Config, ConfigError};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.resolver.nameservers.is_empty());
    assert_eq!(config.resolver.resolv_conf_path, "/etc/resolv.conf");
    assert_eq!(config.resolver.port, 53);
    assert_eq!(config.resolver.timeout(), None);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_partial_toml_uses_defaults() {
    let config = Config::from_toml(
        r#"
        [resolver]
        nameservers = ["9.9.9.9"]
        timeout_ms = 2500
    "#,
    )
    .unwrap();

    assert_eq!(config.resolver.nameservers, vec!["9.9.9.9".to_string()]);
    assert_eq!(config.resolver.timeout(), Some(Duration::from_millis(2500)));
    assert_eq!(config.resolver.port, 53);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[resolver\nport = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_load_from_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[resolver]\nnameservers = [\"1.1.1.1\"]\nport = 5353\n\n[logging]\nlevel = \"warn\""
    )
    .unwrap();

    let overrides = CliOverrides {
        timeout_ms: Some(100),
        log_level: Some("debug".to_string()),
        ..CliOverrides::default()
    };
    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.resolver.nameservers, vec!["1.1.1.1".to_string()]);
    assert_eq!(config.resolver.port, 5353);
    assert_eq!(config.resolver.timeout_ms, Some(100));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_zero_timeout_means_no_deadline() {
    let config = Config::from_toml("[resolver]\ntimeout_ms = 0\n").unwrap();
    assert_eq!(config.resolver.timeout_ms, Some(0));
    assert_eq!(config.resolver.timeout(), None);
}

#[test]
fn test_config_missing_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/dnslookup.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_config_validate_rejects_port_zero() {
    let mut config = Config::default();
    config.resolver.port = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_config_validate_rejects_bad_nameserver() {
    let mut config = Config::default();
    config.resolver.nameservers = vec!["not-an-ip".to_string()];
    assert!(config.validate().is_err());

    config.resolver.nameservers = vec!["192.168.1.1".to_string(), "::1".to_string()];
    assert!(config.validate().is_ok());
}
