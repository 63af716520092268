//! CLI integration tests for geoq commands.
//!
//! These tests focus on exit codes and basic behavioral verification
//! against a mock backend, not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a geoq command isolated from the user's environment.
fn geoq(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("geoq").unwrap();
    cmd.current_dir(home);
    cmd.env("HOME", home);
    cmd.env_remove("GEOQ_URL");
    cmd.env_remove("GEOQ_USERNAME");
    cmd.env_remove("GEOQ_PASSWORD");
    cmd
}

/// The parcels mapping served by the mock backend.
const PARCELS_MAPPING: &str = r##"{
    "parcels": {
        "mappings": {
            "properties": {
                "area": { "type": "float" },
                "type": { "type": "keyword" },
                "geom": { "type": "geo_shape" }
            },
            "_meta": {
                "styles": {
                    "type": {
                        "kind": "categorical",
                        "categories": { "residential": "#00ff00" }
                    }
                }
            }
        }
    }
}"##;

/// Mounts the parcels mapping endpoint.
async fn mock_mapping(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/parcels/_mapping?format=json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PARCELS_MAPPING)
        .create_async()
        .await
}

#[test]
fn help_lists_subcommands() {
    let home = temp_dir();
    geoq(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("indices"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn init_creates_config_file() {
    let home = temp_dir();
    geoq(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let config = home.path().join(".geoq.toml");
    assert!(config.exists());
    let contents = fs::read_to_string(config).unwrap();
    assert!(contents.contains("url"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let home = temp_dir();
    geoq(home.path()).arg("init").assert().success();
    geoq(home.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    geoq(home.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn indices_without_url_fails_with_hint() {
    let home = temp_dir();
    geoq(home.path())
        .arg("indices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backend url configured"));
}

#[test]
fn status_without_config_reports_and_warns() {
    let home = temp_dir();
    geoq(home.path())
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("No configuration files found."))
        .stdout(predicate::str::contains("no backend url configured"));
}

#[tokio::test]
async fn indices_lists_non_system_indices() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/_cat/indices?format=json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[ { "index": "parcels" }, { "index": ".internal" } ]"#)
        .create_async()
        .await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .arg("indices")
            .assert()
            .success()
            .stdout(predicate::str::contains("parcels"))
            .stdout(predicate::str::contains(".internal").not());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_explain_prints_built_request() {
    let mut server = mockito::Server::new_async().await;
    let _mapping = mock_mapping(&mut server).await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args([
                "search", "parcels", "-F", "area", "-f", "area>=100", "--explain",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"gte\": 100.0"))
            .stdout(predicate::str::contains("\"geom\""))
            .stdout(predicate::str::contains("10000"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_no_filters_toggle_omits_thematic_clauses() {
    let mut server = mockito::Server::new_async().await;
    let _mapping = mock_mapping(&mut server).await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args([
                "search",
                "parcels",
                "-f",
                "area>=100",
                "--no-filters",
                "--explain",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("match_all"))
            .stdout(predicate::str::contains("range").not());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_unknown_field_lists_alternatives() {
    let mut server = mockito::Server::new_async().await;
    let _mapping = mock_mapping(&mut server).await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args(["search", "parcels", "-f", "nosuch=1", "--explain"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("has no field 'nosuch'"))
            .stderr(predicate::str::contains("area"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_zero_hits_prints_no_results() {
    let mut server = mockito::Server::new_async().await;
    let _mapping = mock_mapping(&mut server).await;
    let _search = server
        .mock("POST", "/parcels/_search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "hits": { "hits": [] } }"#)
        .create_async()
        .await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args(["search", "parcels", "-F", "area"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_writes_geojson_layer_with_style() {
    let mut server = mockito::Server::new_async().await;
    let _mapping = mock_mapping(&mut server).await;
    let _search = server
        .mock("POST", "/parcels/_search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "hits": {
                    "hits": [
                        {
                            "_id": "1",
                            "_source": {
                                "type": "residential",
                                "geom": { "type": "Point", "coordinates": [-6.0, 37.4] }
                            }
                        }
                    ]
                }
            }"#,
        )
        .create_async()
        .await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        let layer_path = home.path().join("layer.geojson");
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args(["search", "parcels", "-F", "type", "--geojson"])
            .arg(&layer_path)
            .assert()
            .success();

        let layer = fs::read_to_string(&layer_path).unwrap();
        assert!(layer.contains("FeatureCollection"));
        assert!(layer.contains("\"style\""));
        // The field's metadata default style applies when --style is absent.
        assert!(layer.contains("categorical"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_raw_mode_rejects_malformed_bodies() {
    let server = mockito::Server::new_async().await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        let raw_path = home.path().join("request.json");
        fs::write(&raw_path, "{not json").unwrap();

        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args(["search", "parcels", "--raw"])
            .arg(&raw_path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid request body"));
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_raw_mode_sends_validated_body() {
    let mut server = mockito::Server::new_async().await;
    // Raw mode must not fetch the mapping.
    let mapping = server
        .mock("GET", "/parcels/_mapping?format=json")
        .expect(0)
        .create_async()
        .await;
    let _search = server
        .mock("POST", "/parcels/_search")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "size": 10_000,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "hits": { "hits": [] } }"#)
        .create_async()
        .await;

    let home = temp_dir();
    let url = server.url();
    let handle = tokio::task::spawn_blocking(move || {
        let raw_path = home.path().join("request.json");
        fs::write(&raw_path, r#"{"query": {"match_all": {}}}"#).unwrap();

        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args(["search", "parcels", "--raw"])
            .arg(&raw_path)
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    });
    handle.await.unwrap();

    mapping.assert_async().await;
}

#[tokio::test]
async fn inspect_describes_field_controls() {
    let mut server = mockito::Server::new_async().await;
    let _mapping = mock_mapping(&mut server).await;
    let _stats = server
        .mock("POST", "/parcels/_search")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "aggs": { "field_stats": { "stats": { "field": "area" } } },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "hits": { "hits": [] },
                "aggregations": { "field_stats": { "count": 3, "min": 10.0, "max": 900.0 } }
            }"#,
        )
        .create_async()
        .await;

    let home = temp_dir();
    let url = server.url();
    tokio::task::spawn_blocking(move || {
        geoq(home.path())
            .env("GEOQ_URL", &url)
            .args(["inspect", "parcels", "area"])
            .assert()
            .success()
            .stdout(predicate::str::contains("numeric input"))
            .stdout(predicate::str::contains("10 .. 900"));
    })
    .await
    .unwrap();
}
