// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests running the `bloomery` binary.
//!
//! Every run gets an empty environment and a fresh working directory, so
//! neither the developer's shell nor a stray `.env` leaks in.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn workdir(env_file: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    if let Some(content) = env_file {
        std::fs::write(dir.path().join(".env"), content).unwrap();
    }
    dir
}

fn bloomery(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bloomery").unwrap();
    cmd.current_dir(dir).env_clear();
    cmd
}

// =============================================================================
// Credential check
// =============================================================================

#[test]
fn chat_with_credential_prompts_and_exits_on_eof() {
    let dir = workdir(Some("API_KEY=abc123\n"));

    bloomery(dir.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout("> \n")
        .stderr(predicate::str::contains("missing").not());
}

#[test]
fn chat_reads_every_line() {
    let dir = workdir(Some("API_KEY=abc123\n"));

    bloomery(dir.path())
        .arg("chat")
        .write_stdin("hello\n\nworld\n")
        .assert()
        .success()
        .stdout("> > > > \n");
}

#[test]
fn input_that_is_not_utf8_is_discarded() {
    let dir = workdir(Some("API_KEY=abc123\n"));

    bloomery(dir.path())
        .write_stdin(&b"h\xff\nok\n"[..])
        .assert()
        .success()
        .stdout("> > > \n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_credential_fails_without_prompt() {
    let dir = workdir(Some("API_KEY=\n"));

    bloomery(dir.path())
        .write_stdin("hello\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("missing API_KEY in .env"));
}

#[test]
fn disabled_credential_fails() {
    let dir = workdir(Some("API_KEY=# paste your key here\n"));

    bloomery(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(">").not())
        .stderr(predicate::str::contains("API_KEY"));
}

#[test]
fn last_non_empty_duplicate_wins() {
    let dir = workdir(Some("API_KEY=first\nAPI_KEY=\nAPI_KEY=#off\n"));

    bloomery(dir.path()).write_stdin("").assert().success();
}

#[test]
fn missing_env_file_is_fatal() {
    let dir = workdir(None);

    bloomery(dir.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("could not read .env"));
}

#[test]
fn optional_env_file_falls_back_to_process_env() {
    let dir = workdir(None);

    bloomery(dir.path())
        .args(["--set", "agent/require_env_file=false"])
        .env("API_KEY", "from-shell")
        .write_stdin("")
        .assert()
        .success()
        .stdout("> \n");
}

#[test]
fn missing_optional_env_file_is_reported() {
    let dir = workdir(None);

    bloomery(dir.path())
        .args(["--set", "agent/require_env_file=false"])
        .env("API_KEY", "x")
        .write_stdin("")
        .assert()
        .success()
        .stdout("> \n")
        .stderr(predicate::str::contains("dotenv file not found"));
}

#[test]
fn empty_file_value_keeps_process_value() {
    let dir = workdir(Some("API_KEY=\n"));

    bloomery(dir.path())
        .env("API_KEY", "from-shell")
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn nul_byte_in_env_file_is_fatal() {
    let dir = workdir(Some("API_KEY=abc\0def\n"));

    bloomery(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".env:1: value contains a NUL byte"));
}

// =============================================================================
// Providers and settings
// =============================================================================

#[test]
fn provider_flag_selects_credential_variable() {
    let dir = workdir(Some("API_KEY=generic\n"));

    bloomery(dir.path())
        .args(["--provider", "anthropic"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing ANTHROPIC_API_KEY"));
}

#[test]
fn api_key_var_flag_overrides_provider_default() {
    let dir = workdir(Some("MY_KEY=secret\n"));

    bloomery(dir.path())
        .args(["-p", "gemini", "-k", "MY_KEY"])
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn settings_from_environment() {
    let dir = workdir(Some("GEMINI_API_KEY=g-123\n"));

    bloomery(dir.path())
        .env("BLOOMERY_AGENT__PROVIDER", "gemini")
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn prompt_from_default_config_file() {
    let dir = workdir(Some("API_KEY=abc123\n"));
    std::fs::write(
        dir.path().join("bloomery.toml"),
        "[agent]\nprompt = \"you> \"\n",
    )
    .unwrap();

    bloomery(dir.path())
        .write_stdin("hi\n")
        .assert()
        .success()
        .stdout("you> you> \n");

    bloomery(dir.path())
        .arg("--no-default-config")
        .write_stdin("")
        .assert()
        .success()
        .stdout("> \n");
}

#[test]
fn alternate_env_file() {
    let dir = workdir(None);
    std::fs::write(dir.path().join("prod.env"), "API_KEY=abc123\n").unwrap();

    bloomery(dir.path())
        .args(["--env-file", "prod.env"])
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn invalid_override_is_rejected() {
    let dir = workdir(Some("API_KEY=abc123\n"));

    bloomery(dir.path())
        .args(["--set", "agent.provider=openai"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid override"));
}

#[test]
fn unknown_settings_key_is_rejected() {
    let dir = workdir(Some("API_KEY=abc123\n"));
    std::fs::write(dir.path().join("bloomery.toml"), "[agent]\ntemperature = 1\n").unwrap();

    bloomery(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("temperature"));
}

// =============================================================================
// Auxiliary commands
// =============================================================================

#[test]
fn options_hides_credential() {
    let dir = workdir(Some(
        "OPENAI_API_KEY=sk-very-secret\nMODEL_NAME=o3\n",
    ));

    bloomery(dir.path())
        .args(["-p", "openai", "options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-very-secret").not())
        .stdout(predicate::str::contains("session.credential (OPENAI_API_KEY) = [hidden]"))
        .stdout(predicate::str::contains("https://api.openai.com/v1"))
        .stdout(predicate::str::contains("= o3"));
}

#[test]
fn options_reports_missing_credential_without_failing() {
    let dir = workdir(None);

    bloomery(dir.path())
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains("[missing]"));
}

#[test]
fn options_json() {
    let dir = workdir(Some("API_KEY=abc123\n"));

    let output = bloomery(dir.path())
        .args(["options", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["settings"]["agent"]["provider"], "custom");
    assert_eq!(json["settings"]["global"]["output_log_level"], 2);
    assert_eq!(json["session"]["api_key_var"], "API_KEY");
    assert_eq!(json["session"]["credential_present"], true);
    assert!(json["session"].get("openai").is_none());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("abc123"));
}

#[test]
fn sources_lists_loaded_files() {
    let dir = workdir(None);
    std::fs::write(dir.path().join("bloomery.toml"), "[agent]\n").unwrap();
    std::fs::write(dir.path().join("extra.toml"), "[global]\n").unwrap();

    bloomery(dir.path())
        .args(["--config", "extra.toml", "sources"])
        .assert()
        .success()
        .stdout("1. [optional] bloomery.toml\n2. [file] extra.toml\n");

    bloomery(dir.path())
        .args(["--no-default-config", "sources"])
        .assert()
        .success()
        .stdout("No configuration files loaded\n");
}

#[test]
fn version_prints_package_version() {
    let dir = workdir(None);

    bloomery(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn help_lists_commands() {
    let dir = workdir(None);

    bloomery(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: bloomery"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("options"))
        .stdout(predicate::str::contains("--env-file"));
}
