//! CLI integration tests for schemadump.
//!
//! These tests verify command-line argument parsing, help output,
//! and exit codes for error conditions that occur before any connection.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the schemadump binary.
fn cmd() -> Command {
    Command::cargo_bin("schemadump").unwrap()
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("health-check"));
}

#[test]
fn test_generate_subcommand_help() {
    cmd()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("%t"));
}

#[test]
fn test_inspect_subcommand_help() {
    cmd()
        .args(["inspect", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[TABLES]"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("schemadump"));
}

// =============================================================================
// Global Flags Tests
// =============================================================================

#[test]
fn test_dsn_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dsn"));
}

#[test]
fn test_log_format_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: info]"));
}

#[test]
fn test_short_config_flag() {
    // -c should work as short for --config
    cmd()
        .args(["-c", "some_config.yaml", "--help"])
        .assert()
        .success();
}

// =============================================================================
// Exit Code Tests - Config Errors (Exit Code 1)
// =============================================================================

#[test]
fn test_missing_config_exits_with_code_7() {
    // Missing file is an IO error (code 7), not config error (code 1)
    cmd()
        .args(["--config", "nonexistent_config_file.yaml", "health-check"])
        .assert()
        .code(7); // EXIT_IO_ERROR - file not found
}

#[test]
fn test_no_config_and_no_dsn_exits_with_code_1() {
    cmd()
        .arg("health-check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--dsn"));
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "invalid: yaml: content: [").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "health-check"])
        .assert()
        .code(1); // EXIT_CONFIG_ERROR
}

#[test]
fn test_empty_config_exits_with_code_1() {
    let file = tempfile::NamedTempFile::new().unwrap();
    // Empty file has no source settings

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "health-check"])
        .assert()
        .code(1); // EXIT_CONFIG_ERROR
}

#[test]
fn test_missing_required_fields_exits_with_code_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // Valid YAML but missing required config fields
    writeln!(file, "source:").unwrap();
    writeln!(file, "  host: localhost").unwrap();

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "health-check"])
        .assert()
        .code(1) // EXIT_CONFIG_ERROR
        .stderr(predicate::str::contains("source.database"));
}

#[test]
fn test_invalid_dsn_scheme_exits_with_code_1() {
    cmd()
        .args(["--dsn", "postgres://localhost/app", "inspect"])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_log_format_exits_with_code_1() {
    cmd()
        .args(["--log-format", "xml", "--dsn", "mysql://localhost/app", "health-check"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("log format"));
}

#[test]
fn test_invalid_table_name_exits_with_code_1() {
    let long_name = "t".repeat(65);
    cmd()
        .args(["--dsn", "mysql://localhost/app", "inspect", &long_name])
        .assert()
        .code(1);
}

#[test]
fn test_unknown_format_is_rejected() {
    cmd()
        .args(["--dsn", "mysql://localhost/app", "generate", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

#[test]
fn test_missing_template_exits_with_code_7_before_connecting() {
    // The template is compiled before any connection attempt
    cmd()
        .args([
            "--dsn",
            "mysql://root@127.0.0.1:1/app",
            "generate",
            "--template",
            "nonexistent_template.tmpl",
        ])
        .assert()
        .code(7);
}

#[test]
fn test_broken_template_exits_with_code_5() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{% for c in columns %}}").unwrap();

    cmd()
        .args([
            "--dsn",
            "mysql://root@127.0.0.1:1/app",
            "generate",
            "--template",
            file.path().to_str().unwrap(),
        ])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Render error"));
}

// =============================================================================
// Exit Code Tests - Database Errors (Exit Code 4)
// =============================================================================

#[test]
fn test_unreachable_server_exits_with_code_4() {
    // Port 1 on localhost refuses connections
    cmd()
        .args(["--dsn", "mysql://root@127.0.0.1:1/app", "health-check"])
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .code(4); // EXIT_DATABASE_ERROR
}

// =============================================================================
// Subcommand Existence Tests
// =============================================================================

#[test]
fn test_health_check_command_exists() {
    cmd()
        .args(["health-check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test the database connection"));
}

// =============================================================================
// No Subcommand Tests
// =============================================================================

#[test]
fn test_no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}
