use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn catalog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("planet-catalog").unwrap();
    let url = format!("sqlite://{}", dir.path().join("catalog.db").display());
    cmd.env("DATABASE_URL", url)
        .env_remove("SWAPI_PLANETS_URL")
        .env_remove("PLANET_CATALOG_API_TOKEN")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("planet-catalog").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("REST catalog of planets"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("planet-catalog").unwrap();
    cmd.arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("port").and(predicate::str::contains("host")));
}

#[test]
fn test_cli_serve_rejects_non_ip_host() {
    let dir = TempDir::new().unwrap();
    catalog(&dir)
        .args(["serve", "--host", "not-an-ip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_sync_without_remote_fails() {
    let dir = TempDir::new().unwrap();
    catalog(&dir)
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SWAPI_PLANETS_URL"));
}

#[test]
fn test_cli_sync_unreachable_remote_fails() {
    let dir = TempDir::new().unwrap();
    catalog(&dir)
        .env("SWAPI_PLANETS_URL", "http://127.0.0.1:9/planets")
        .env("SWAPI_TIMEOUT_SECS", "2")
        .arg("sync")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_cli_rejects_unknown_database_scheme() {
    let dir = TempDir::new().unwrap();
    catalog(&dir)
        .env("DATABASE_URL", "mysql://localhost/catalog")
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mysql"));
}
