//! CLI integration tests
//!
//! Drives the binary through `--validate` to check config loading, the
//! `HADOOP_EXPORTER_*` overrides and their precedence over the file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the hadoop-jmx-exporter binary
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("hadoop-jmx-exporter").expect("Failed to find hadoop-jmx-exporter binary")
}

/// Helper to create a temporary config file with given content
fn create_temp_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file.flush().expect("Failed to flush");
    file
}

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("--module"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_valid_config() {
    let config = r#"
hadoop:
  url: "http://namenode:9870/jmx"
  module: "nn1"
  timeout_ms: 3000

server:
  port: 19288
  path: "/metrics"

naming:
  suffix_numbering: legacy
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_custom_region_server_beans() {
    let config = r#"
hadoop:
  url: "http://rs1:16030/jmx"

naming:
  suffix_numbering: ordinal
  region_server_beans:
    - "Hadoop:service=HBase,name=RegionServer,sub=Regions"
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_invalid_config_bad_yaml() {
    let config = r#"
hadoop:
  url: [not valid yaml
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .failure();
}

#[test]
fn test_unknown_suffix_numbering_rejected() {
    let config = r#"
naming:
  suffix_numbering: sequential
"#;

    let file = create_temp_config(config);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .failure();
}

#[test]
fn test_validate_rejects_invalid_values() {
    let cases = [
        ("port zero", "server:\n  port: 0\n"),
        ("relative path", "server:\n  path: \"metrics\"\n"),
        ("path shadows health", "server:\n  path: \"/health\"\n"),
        ("zero timeout", "hadoop:\n  timeout_ms: 0\n"),
        ("ftp target", "hadoop:\n  url: \"ftp://namenode/jmx\"\n"),
    ];

    for (case, yaml) in cases {
        let file = create_temp_config(yaml);
        let assert = cmd()
            .arg("-c")
            .arg(file.path())
            .arg("--validate")
            .assert()
            .failure();
        let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
        assert!(stderr.contains("Invalid configuration"), "{}: {}", case, stderr);
    }
}

#[test]
fn test_server_mode_refuses_invalid_config() {
    let file = create_temp_config("server:\n  port: 0\n");

    cmd()
        .arg("-c")
        .arg(file.path())
        .timeout(std::time::Duration::from_millis(1000))
        .assert()
        .failure();
}

#[test]
fn test_target_override_is_validated() {
    let file = create_temp_config("server:\n  port: 19289\n");

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--target")
        .arg("not a url")
        .arg("--validate")
        .assert()
        .failure();
}

#[test]
fn test_port_override_corrects_invalid_file_value() {
    let file = create_temp_config("server:\n  port: 0\n");

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--port")
        .arg("9100")
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_env_target_corrects_invalid_file_value() {
    let file = create_temp_config("hadoop:\n  url: \"ftp://namenode/jmx\"\n");

    cmd()
        .arg("-c")
        .arg(file.path())
        .env("HADOOP_EXPORTER_TARGET", "http://namenode:9870/jmx")
        .arg("--validate")
        .assert()
        .success();
}

#[test]
fn test_validate_missing_config_file() {
    cmd()
        .arg("-c")
        .arg("/nonexistent/path/config.yaml")
        .arg("--validate")
        .assert()
        .failure();
}
