//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;
use webinix_common::{Browser, ConfigError};

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_webinix_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[library]
search_dir = "/opt/webinix"

[window]
browser = "firefox"
multi_access = true
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(
        config.library.search_dir.as_deref(),
        Some(Path::new("/opt/webinix"))
    );
    assert_eq!(config.window.browser, Browser::Firefox);
    assert!(config.window.multi_access);
    // Defaults preserved
    assert_eq!(config.script.max_response_bytes, 8192);
    assert_eq!(config.cache.dir, "__intcache__");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_is_still_returned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[script]
max_response_bytes = 0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.script.max_response_bytes, 0);
}

#[test]
fn write_default_config_creates_loadable_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    write_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.startup.timeout_secs, 30);
    assert_eq!(config.window.browser, Browser::Any);
}

#[test]
fn default_config_path_ends_with_webinix_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("webinix/config.toml"));
    }
}

#[test]
fn unreadable_path_is_an_io_error_not_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    // A directory exists but cannot be read as a file.
    match load_from_path(dir.path()) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, dir.path()),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn write_default_config_reports_blocked_parent() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    let err = write_default_config(&blocker.join("config.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
