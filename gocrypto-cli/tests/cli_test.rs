//! End-to-end tests for the gocrypto-cli binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn config_file(staging_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
        [credentials]
        client_id = "client-1"
        client_secret = "secret-1"
        host = "shop.test"
        shop_name = "Test Shop"

        [endpoints]
        staging_url = "{staging_url}"

        [http]
        timeout_secs = 2
        connect_timeout_secs = 1
        "#
    )
    .expect("write config");
    file
}

#[test]
fn missing_arguments_fail() {
    Command::cargo_bin("gocrypto-cli")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn missing_config_file_is_setup_error() {
    Command::cargo_bin("gocrypto-cli")
        .unwrap()
        .args(["--config", "/nonexistent/gocrypto.toml"])
        .args(["--total", "2500", "--return-url", "https://shop.test/after"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn invalid_return_url_is_setup_error() {
    let config = config_file("http://127.0.0.1:1");

    Command::cargo_bin("gocrypto-cli")
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .args(["--total", "2500", "--return-url", "not-a-url"])
        .assert()
        .code(2);
}

#[test]
fn unreachable_gateway_prints_recorded_outcome() {
    let config = config_file("http://127.0.0.1:1");

    Command::cargo_bin("gocrypto-cli")
        .unwrap()
        .arg("--config")
        .arg(config.path())
        .args(["--total", "2500", "--return-url", "https://shop.test/after"])
        .args(["--log-format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""outcome":"recorded""#))
        .stdout(predicate::str::contains(r#""kind":"transport""#))
        .stdout(predicate::str::contains(r#""stage":"auth""#));
}
