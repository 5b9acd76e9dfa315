//! Tests for configuration system

use mealmuse::Config;
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.database.url, "sqlite:mealmuse.db");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.calendar.timezone, "UTC");
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_loads_explicit_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.child("mealmuse.toml");
    std::fs::write(
        &path,
        r#"
[database]
url = "sqlite:family.db"
max_connections = 2

[calendar]
timezone = "Europe/Paris"

[llm]
endpoint = "https://llm.example.com/invoke"
api_key = "secret"
"#,
    )
    .expect("Failed to write config");

    let config = Config::load(Some(path.display().to_string())).expect("Failed to load config");

    assert_eq!(config.database.url, "sqlite:family.db");
    assert_eq!(config.database.max_connections, 2);
    assert_eq!(config.calendar.timezone, "Europe/Paris");
    assert_eq!(config.llm.endpoint, "https://llm.example.com/invoke");
    assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_env_overrides_file() {
    // Only this test reads the LLM timeout, so the variable does not leak into other asserts
    unsafe {
        std::env::set_var("MEALMUSE__LLM__TIMEOUT_SECS", "15");
    }

    let config = Config::load(None).expect("Failed to load config");

    unsafe {
        std::env::remove_var("MEALMUSE__LLM__TIMEOUT_SECS");
    }

    assert_eq!(config.llm.timeout_secs, 15);
}

#[test]
fn test_invalid_file_timezone_fails_validation() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.child("mealmuse.toml");
    std::fs::write(
        &path,
        "[database]\nurl = \"sqlite:x.db\"\nmax_connections = 1\n\n[calendar]\ntimezone = \"Nowhere/Special\"\n",
    )
    .expect("Failed to write config");

    let config = Config::load(Some(path.display().to_string())).expect("Failed to load config");

    assert!(config.validate().is_err());
}
