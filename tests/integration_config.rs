// bloomery: conversational agent bootstrap
//
// SPDX-FileCopyrightText: 2026 bloomery contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for settings layering and bootstrap resolution.
//!
//! Exercises files on disk through the public library API.

use std::path::Path;

use bloomery::bootstrap::{self, DEFAULT_OPENAI_BASE_URL};
use bloomery::config::Config;
use bloomery::config::loader::ConfigLoader;
use bloomery::config::types::Provider;
use bloomery::env::{DotenvFile, Env, LoadedEnv};
use bloomery::logging::LogLevel;
use secrecy::ExposeSecret;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_files_layer_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = write(
        dir.path(),
        "base.toml",
        "[global]\noutput_log_level = 4\n\n[agent]\nprovider = \"anthropic\"\n",
    );
    let local = write(dir.path(), "local.toml", "[agent]\nprovider = \"openai\"\n");

    let config = ConfigLoader::new()
        .add_toml_file(&base)
        .add_toml_file(&local)
        .build()
        .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.agent.provider, Provider::OpenAi);
}

#[test]
fn overrides_beat_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "bloomery.toml", "[agent]\nenv_file = \"a.env\"\n");

    let config = ConfigLoader::new()
        .add_toml_file_optional(&file)
        .set_override("agent/env_file=b.env")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.agent.env_file, Path::new("b.env"));
}

#[test]
fn invalid_toml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "broken.toml", "[agent\nprovider = \n");

    let err = Config::from_file(&file).unwrap_err();
    assert!(err.to_string().starts_with("failed to load settings"), "{err}");
}

// =============================================================================
// Bootstrap
// =============================================================================

#[test]
fn openai_session_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = write(
        dir.path(),
        "agent.env",
        "# OpenAI-compatible endpoint\nOPENAI_API_KEY = sk-local\nOPENAI_BASE_URL=#disabled\nMODEL_NAME=llama3\n",
    );
    let settings = write(
        dir.path(),
        "bloomery.toml",
        &format!(
            "[agent]\nprovider = \"openai\"\nenv_file = {:?}\n",
            env_path.display().to_string()
        ),
    );

    let config = Config::from_file(&settings).unwrap();
    let loaded = LoadedEnv::new(Env::new(), DotenvFile::load(&config.agent.env_file).unwrap());
    let session = bootstrap::resolve(&config.agent, loaded.env()).unwrap();

    assert_eq!(session.credential().var(), "OPENAI_API_KEY");
    assert_eq!(session.credential().secret().expose_secret(), "sk-local");

    let openai = session.openai().unwrap();
    assert_eq!(openai.base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(openai.model, "llama3");
}

#[test]
fn process_values_survive_the_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = write(dir.path(), ".env", "MODEL_NAME=from-file\n");

    let base: Env = [("OPENAI_API_KEY", "sk-shell"), ("MODEL_NAME", "from-shell")]
        .into_iter()
        .collect();
    let loaded = LoadedEnv::new(base, DotenvFile::load(&env_path).unwrap());

    let config = Config::parse("[agent]\nprovider = \"openai\"\n").unwrap();
    let session = bootstrap::resolve(&config.agent, loaded.env()).unwrap();

    assert_eq!(session.credential().secret().expose_secret(), "sk-shell");
    assert_eq!(session.openai().unwrap().model, "from-file");
}

#[test]
fn dotenv_credential_replaces_process_credential() {
    let dir = tempfile::tempdir().unwrap();
    let env_path = write(dir.path(), ".env", "API_KEY=from-file\n");

    let base: Env = [("API_KEY", "from-shell")].into_iter().collect();
    let loaded = LoadedEnv::new(base, DotenvFile::load(&env_path).unwrap());

    let session = bootstrap::resolve(&Config::default().agent, loaded.env()).unwrap();
    assert_eq!(session.credential().secret().expose_secret(), "from-file");
}
