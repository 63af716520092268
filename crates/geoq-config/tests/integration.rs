//! Integration tests for configuration discovery and merging.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::fs;
use std::path::PathBuf;

use geoq_config::{
    CONFIG_FILENAME, Config, ConfigWarning, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS, PanelPosition,
    discover_config_files, is_global_config,
};

/// Writes a config file under `dir` and returns its path.
fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(CONFIG_FILENAME);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_from_files_merges_in_precedence_order() {
    let tmp = tempfile::tempdir().unwrap();
    let project = write_config(
        &tmp.path().join("project"),
        "url = \"http://project:9200\"\n[panel]\ndefault_index = \"parcels\"\n",
    );
    let home = write_config(
        tmp.path(),
        "url = \"http://home:9200\"\ntitle = \"Home\"\n[http]\nretries = 5\n",
    );

    let config = Config::load_from_files(&[project, home]).unwrap();

    assert_eq!(config.url.as_deref(), Some("http://project:9200"));
    assert_eq!(config.title.as_deref(), Some("Home"));
    assert_eq!(config.retries, 5);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.panel.default_index.as_deref(), Some("parcels"));
    assert_eq!(config.panel.position, PanelPosition::TopRight);
}

#[test]
fn load_from_no_files_yields_defaults() {
    let config = Config::load_from_files(&[]).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.retries, DEFAULT_RETRIES);
}

#[test]
fn discovery_walks_up_and_respects_root() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(tmp.path(), "title = \"outer\"\n");
    let rooted = write_config(&tmp.path().join("app"), "root = true\ntitle = \"app\"\n");
    let cwd = tmp.path().join("app/src/deep");
    fs::create_dir_all(&cwd).unwrap();

    let files = discover_config_files(&cwd);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0], rooted);
}

#[test]
fn discovery_includes_everything_without_root() {
    let tmp = tempfile::tempdir().unwrap();
    let outer = write_config(tmp.path(), "title = \"outer\"\n");
    let inner = write_config(&tmp.path().join("app"), "title = \"app\"\n");
    let cwd = tmp.path().join("app/src");
    fs::create_dir_all(&cwd).unwrap();

    let files = discover_config_files(&cwd);
    let local: Vec<_> = files.iter().filter(|p| !is_global_config(p)).collect();

    assert_eq!(local, [&inner, &outer]);
}

#[test]
fn parse_error_propagates_with_path() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = write_config(tmp.path(), "url = [not toml\n");

    let err = Config::load_from_files(&[bad.clone()]).unwrap_err();
    assert!(err.to_string().contains(bad.to_string_lossy().as_ref()));
}

#[test]
fn validation_flags_missing_url_and_lonely_username() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_config(tmp.path(), "[auth]\nusername = \"elastic\"\n");

    let config = Config::load_from_files(&[path]).unwrap();
    let warnings = config.validate();

    assert!(warnings.contains(&ConfigWarning::NoUrlConfigured));
    assert!(warnings.iter().any(|w| matches!(
        w,
        ConfigWarning::UsernameWithoutPassword { username } if username == "elastic"
    )));
}
